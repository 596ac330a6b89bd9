//! Integration tests for registration, login, and session auth

use axum::http::StatusCode;
use tower::util::ServiceExt;

mod helpers;
use helpers::*;

#[tokio::test]
async fn register_creates_account_and_session() {
    let (app, pool) = create_test_app().await;

    let cookie = register_user(&app, "ada@example.com").await;
    assert!(cookie.starts_with("bookshelf_session="));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users_table")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // The fresh session grants access to a protected listing
    let response = app
        .clone()
        .oneshot(get_with_cookie("/reading", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let (app, pool) = create_test_app().await;

    register_user(&app, "ada@example.com").await;

    let body = "first_name=Other&last_name=Person&email=ada@example.com&password=pw&repeat_password=pw";
    let response = app.clone().oneshot(post_form("/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));

    // No second account was created
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users_table")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn registration_validation_rerenders_form() {
    let (app, pool) = create_test_app().await;

    let body = "first_name=Ada&last_name=L&email=ada@example.com&password=pw&repeat_password=other";
    let response = app.clone().oneshot(post_form("/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert!(page.contains("Passwords do not match"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users_table")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn registration_with_missing_fields_rerenders_form() {
    let (app, pool) = create_test_app().await;

    // No repeat_password field at all (a browser form cannot produce this,
    // but a raw POST can)
    let body = "first_name=Ada&last_name=L&email=ada@example.com&password=pw";
    let response = app.clone().oneshot(post_form("/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert!(page.contains("All fields are required"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users_table")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn login_with_missing_fields_rejected() {
    let (app, _pool) = create_test_app().await;
    register_user(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "email=ada@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn login_with_correct_password_succeeds() {
    let (app, _pool) = create_test_app().await;
    register_user(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "email=ada@example.com&password=secret"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookie = session_cookie(&response).expect("Login did not set a session cookie");
    let response = app
        .clone()
        .oneshot(get_with_cookie("/complete", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_rejected() {
    let (app, _pool) = create_test_app().await;
    register_user(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "email=ada@example.com&password=wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn login_with_unknown_email_rejected() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "email=nobody@example.com&password=pw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
}

#[tokio::test]
async fn protected_routes_require_login() {
    let (app, _pool) = create_test_app().await;

    for uri in ["/reading", "/complete", "/future", "/add_read/vol1"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "route {}", uri);
        assert!(location(&response).starts_with("/login"), "route {}", uri);
    }
}

#[tokio::test]
async fn logout_invalidates_session() {
    let (app, _pool) = create_test_app().await;
    let cookie = register_user(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The old token no longer grants access
    let response = app
        .clone()
        .oneshot(get_with_cookie("/reading", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _pool) = create_test_app().await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert!(page.contains("\"status\":\"ok\""));
}
