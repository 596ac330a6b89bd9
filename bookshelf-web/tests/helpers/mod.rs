//! Shared test helpers: in-memory app construction, a stub catalog server,
//! and request/response plumbing.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query},
    http::{header, Request, Response, StatusCode},
    response::IntoResponse,
    routing,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tower::util::ServiceExt;

use bookshelf_web::services::catalog::CatalogClient;
use bookshelf_web::{build_router, AppState};

fn volume_json(id: &str) -> Value {
    json!({
        "id": id,
        "volumeInfo": {
            "title": format!("Test Book {}", id),
            "authors": ["Test Author"],
            "publishedDate": "2001",
            "imageLinks": { "thumbnail": format!("http://covers.example/{}.jpg", id) }
        }
    })
}

async fn stub_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    if q.contains("nothing") {
        // The real API omits `items` entirely when there are no matches
        return Json(json!({ "totalItems": 0 }));
    }
    Json(json!({
        "totalItems": 2,
        "items": [volume_json("vol1"), volume_json("vol2")]
    }))
}

async fn stub_volume(Path(id): Path<String>) -> axum::response::Response {
    match id.as_str() {
        "vol1" | "vol2" => Json(volume_json(&id)).into_response(),
        "missing-title" => {
            Json(json!({ "id": "missing-title", "volumeInfo": { "authors": ["X"] } }))
                .into_response()
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response(),
    }
}

/// Start a stub catalog API on an ephemeral port, returning its base URL
pub async fn spawn_stub_catalog() -> String {
    let app = Router::new()
        .route("/volumes", routing::get(stub_search))
        .route("/volumes/:id", routing::get(stub_volume));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub catalog");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub catalog crashed");
    });

    format!("http://{}", addr)
}

/// Create a test app backed by an in-memory database and the stub catalog
pub async fn create_test_app() -> (Router, SqlitePool) {
    let catalog_base = spawn_stub_catalog().await;
    create_test_app_with_catalog(&catalog_base).await
}

/// Create a test app pointing at a specific catalog base URL
pub async fn create_test_app_with_catalog(catalog_base: &str) -> (Router, SqlitePool) {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    bookshelf_common::db::init::create_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    let catalog = CatalogClient::new(catalog_base).expect("Failed to create catalog client");
    let state = AppState::new(pool.clone(), catalog, 168);

    (build_router(state), pool)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn post_form_with_cookie(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Extract the `name=value` pair from a Set-Cookie response header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    Some(raw.split(';').next()?.trim().to_string())
}

/// Location header of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Register a user through the real registration route, returning the
/// session cookie granted on success
pub async fn register_user(app: &Router, email: &str) -> String {
    let body = format!(
        "first_name=Test&last_name=User&email={}&password=secret&repeat_password=secret",
        email
    );
    let response = app
        .clone()
        .oneshot(post_form("/register", &body))
        .await
        .expect("Registration request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("Registration did not set a session cookie")
}
