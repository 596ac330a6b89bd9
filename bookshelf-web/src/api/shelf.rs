//! Shelf handlers: bucket listings and placement routes
//!
//! All routes here sit behind the `require_login` middleware, which puts
//! the authenticated user into request extensions.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension,
};
use bookshelf_common::db::models::ReadingStatus;

use crate::api::auth::CurrentUser;
use crate::db;
use crate::error::PageResult;
use crate::services::shelf;
use crate::ui;
use crate::AppState;

/// GET /reading
pub async fn list_in_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    list_bucket(&state, &user, ReadingStatus::InProgress).await
}

/// GET /complete
pub async fn list_completed(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    list_bucket(&state, &user, ReadingStatus::Completed).await
}

/// GET /future
pub async fn list_read_later(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PageResult<Html<String>> {
    list_bucket(&state, &user, ReadingStatus::ReadLater).await
}

async fn list_bucket(
    state: &AppState,
    user: &bookshelf_common::db::models::User,
    status: ReadingStatus,
) -> PageResult<Html<String>> {
    let books = db::books::list_by_status(&state.db, user.id, status).await?;
    Ok(ui::bucket_page(user, status, &books))
}

/// GET /add_read/{id}
pub async fn add_in_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(external_id): Path<String>,
) -> PageResult<Redirect> {
    shelf::place(&state, user.id, &external_id, ReadingStatus::InProgress).await?;
    Ok(Redirect::to("/reading"))
}

/// GET /add_complete/{id}
pub async fn add_completed(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(external_id): Path<String>,
) -> PageResult<Redirect> {
    shelf::place(&state, user.id, &external_id, ReadingStatus::Completed).await?;
    Ok(Redirect::to("/complete"))
}

/// GET /add_future/{id}
pub async fn add_read_later(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(external_id): Path<String>,
) -> PageResult<Redirect> {
    shelf::place(&state, user.id, &external_id, ReadingStatus::ReadLater).await?;
    Ok(Redirect::to("/future"))
}
