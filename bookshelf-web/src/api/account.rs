//! Account handlers: registration, login, logout

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::api::auth::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::db;
use crate::error::{PageError, PageResult};
use crate::ui;
use crate::AppState;

/// Flash message carried across a redirect as a query parameter
#[derive(Debug, Deserialize)]
pub struct FlashParams {
    pub msg: Option<String>,
}

/// Fields default to empty so a request omitting one lands in
/// `validate_registration` instead of a deserialization rejection
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub repeat_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// GET /register
pub async fn register_form() -> Html<String> {
    ui::register_page(None)
}

/// POST /register
///
/// Validation failure re-renders the form with an inline message; a
/// duplicate email redirects to the login page with a flashed message.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> PageResult<Response> {
    if let Some(message) = validate_registration(&form) {
        return Ok(ui::register_page(Some(message)).into_response());
    }

    let email = form.email.trim().to_lowercase();

    if db::users::find_by_email(&state.db, &email).await?.is_some() {
        return Ok(duplicate_account_redirect().into_response());
    }

    let password_hash = bcrypt::hash(&form.password, bcrypt::DEFAULT_COST)
        .map_err(|e| PageError::Internal(format!("Password hashing failed: {}", e)))?;

    let user_id = match db::users::create_user(
        &state.db,
        form.first_name.trim(),
        form.last_name.trim(),
        &email,
        &password_hash,
    )
    .await
    {
        Ok(id) => id,
        // Two registrations for the same email can race past the lookup
        // above; the UNIQUE(email) constraint catches the loser.
        Err(bookshelf_common::Error::Database(e)) if is_unique_violation(&e) => {
            return Ok(duplicate_account_redirect().into_response());
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user_id, email = %email, "Registered new user");

    let session = db::sessions::create_session(&state.db, user_id, state.session_ttl_hours).await?;
    let jar = jar.add(session_cookie(&session.token));

    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /login
pub async fn login_form(Query(params): Query<FlashParams>) -> Html<String> {
    ui::login_page(params.msg.as_deref())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    // Opportunistic cleanup so the table does not accumulate dead rows
    db::sessions::purge_expired(&state.db).await?;

    let email = form.email.trim().to_lowercase();

    let Some(user) = db::users::find_by_email(&state.db, &email).await? else {
        return Ok(Redirect::to("/login?msg=That+email+does+not+exist,+please+try+again").into_response());
    };

    if !bcrypt::verify(&form.password, &user.password_hash).unwrap_or(false) {
        return Ok(Redirect::to("/login?msg=Password+incorrect,+please+try+again").into_response());
    }

    let session = db::sessions::create_session(&state.db, user.id, state.session_ttl_hours).await?;
    info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(&session.token));
    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> PageResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        db::sessions::delete_session(&state.db, cookie.value()).await?;
    }

    let jar = jar.remove(removal_cookie());
    Ok((jar, Redirect::to("/")).into_response())
}

fn duplicate_account_redirect() -> Redirect {
    Redirect::to("/login?msg=You+already+have+an+account,+log+in+instead")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Form validation: all fields required, email must look like an email,
/// passwords must match. Returns the inline message to render, if any.
fn validate_registration(form: &RegisterForm) -> Option<&'static str> {
    if form.first_name.trim().is_empty()
        || form.last_name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
        || form.repeat_password.is_empty()
    {
        return Some("All fields are required");
    }

    let email = form.email.trim();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Some("Please enter a valid email address");
    }

    if form.password != form.repeat_password {
        return Some("Passwords do not match");
    }

    None
}
