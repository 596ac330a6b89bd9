//! Session authentication for bookshelf-web
//!
//! The browser holds a random session token in an HttpOnly cookie; the
//! matching row in sessions_table is loaded on every protected request.
//! Applied to protected routes only via `middleware::from_fn_with_state`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use bookshelf_common::db::models::User;
use tracing::error;

use crate::{db, ui, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "bookshelf_session";

/// The authenticated user, inserted into request extensions by
/// `require_login` for downstream handlers
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Build the session cookie for a freshly created session token
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .build()
}

/// Cookie that removes the session from the browser
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Authentication middleware for protected routes
///
/// Loads the session and its user, stashes `CurrentUser` in request
/// extensions, and redirects to the login page when the session is
/// missing, expired, or orphaned.
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Err(AuthRejection::NotLoggedIn);
    };

    let session = db::sessions::find_valid(&state.db, cookie.value())
        .await
        .map_err(AuthRejection::internal)?;
    let Some(session) = session else {
        return Err(AuthRejection::NotLoggedIn);
    };

    let user = db::users::find_by_id(&state.db, session.user_id)
        .await
        .map_err(AuthRejection::internal)?;
    let Some(user) = user else {
        // Session points at a deleted user; treat as logged out
        return Err(AuthRejection::NotLoggedIn);
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Resolve the session user for public pages that render differently
/// when someone is logged in (home, search). Never rejects.
pub async fn session_user(state: &AppState, jar: &CookieJar) -> Option<User> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    let session = db::sessions::find_valid(&state.db, &token).await.ok()??;
    db::users::find_by_id(&state.db, session.user_id).await.ok()?
}

/// Rejection for unauthenticated or failed-authentication requests
#[derive(Debug)]
pub enum AuthRejection {
    NotLoggedIn,
    Internal(String),
}

impl AuthRejection {
    fn internal(err: bookshelf_common::Error) -> Self {
        AuthRejection::Internal(err.to_string())
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::NotLoggedIn => {
                Redirect::to("/login?msg=Please+log+in+first").into_response()
            }
            AuthRejection::Internal(msg) => {
                error!("Authentication error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ui::error_page(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong"),
                )
                    .into_response()
            }
        }
    }
}
