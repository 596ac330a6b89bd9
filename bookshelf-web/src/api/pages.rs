//! Home page

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::api::auth::session_user;
use crate::ui;
use crate::AppState;

/// GET /
///
/// Public; the page links to registration or the shelf depending on
/// whether a session is present.
pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let user = session_user(&state, &jar).await;
    ui::home_page(user.as_ref())
}
