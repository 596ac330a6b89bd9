//! bookshelf-web library - HTTP service for the Bookshelf application
//!
//! Exposes the application state and router so integration tests can drive
//! the service without binding a socket.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::services::catalog::CatalogClient;

pub mod api;
pub mod db;
pub mod error;
pub mod services;
pub mod ui;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Client for the external book catalog API
    pub catalog: CatalogClient,
    /// Session cookie lifetime in hours
    pub session_ttl_hours: i64,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: CatalogClient, session_ttl_hours: i64) -> Self {
        Self {
            db,
            catalog,
            session_ttl_hours,
        }
    }
}

/// Build application router
///
/// Bucket listings and shelf placement require a logged-in session; the
/// remaining pages (home, account forms, catalog search, health) are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    // Protected routes (require a valid session)
    let protected = Router::new()
        .route("/reading", get(api::shelf::list_in_progress))
        .route("/complete", get(api::shelf::list_completed))
        .route("/future", get(api::shelf::list_read_later))
        .route("/add_read/:id", get(api::shelf::add_in_progress))
        .route("/add_complete/:id", get(api::shelf::add_completed))
        .route("/add_future/:id", get(api::shelf::add_read_later))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_login,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/", get(api::pages::home))
        .route(
            "/login",
            get(api::account::login_form).post(api::account::login),
        )
        .route("/logout", get(api::account::logout))
        .route(
            "/register",
            get(api::account::register_form).post(api::account::register),
        )
        .route(
            "/book",
            get(api::search::search_form).post(api::search::search),
        )
        .merge(api::health::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
