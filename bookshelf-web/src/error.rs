//! Error types for bookshelf-web
//!
//! Every handler failure funnels into `PageError`, which renders the
//! generic HTML error page (the app is server-rendered, so errors are
//! pages rather than JSON bodies).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::services::catalog::CatalogError;
use crate::ui;

/// Page-level error type
#[derive(Debug, Error)]
pub enum PageError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// External catalog API failure (502)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Database operation failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Shared library error (500)
    #[error(transparent)]
    Common(#[from] bookshelf_common::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PageError::Catalog(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            PageError::Database(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            PageError::Common(err) => {
                error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            PageError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, ui::error_page(status, &message)).into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;
