//! Catalog search handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::auth::session_user;
use crate::error::PageResult;
use crate::ui;
use crate::AppState;

/// `book_needed` defaults to empty so a request omitting the field gets
/// the empty-query re-render rather than a deserialization rejection
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub book_needed: String,
}

/// GET /book
pub async fn search_form(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let user = session_user(&state, &jar).await;
    ui::search_page(user.as_ref(), None)
}

/// POST /book
///
/// Runs the catalog search. An empty query re-renders the form with an
/// inline message; zero matches renders the error page; a catalog failure
/// propagates as `PageError::Catalog` (also the error page).
pub async fn search(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> PageResult<Response> {
    let user = session_user(&state, &jar).await;

    let query = form.book_needed.trim();
    if query.is_empty() {
        return Ok(ui::search_page(user.as_ref(), Some("Please enter a title to search for")).into_response());
    }

    let results = state.catalog.search(query).await?;

    if results.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            ui::error_page(StatusCode::NOT_FOUND, "No books matched your search"),
        )
            .into_response());
    }

    Ok(ui::search_results_page(user.as_ref(), query, &results).into_response())
}
