use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

mod common;

use common::send;

#[tokio::test]
async fn health_check_returns_ok() {
    let db = common::setup_db().await.expect("Failed to setup test database");
    let app = common::create_test_app(db);

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"OK");
}

#[tokio::test]
async fn allows_configured_origin() {
    let db = common::setup_db().await.expect("Failed to setup test database");
    let app = common::create_test_app(db);

    let request = Request::builder()
        .uri("/api/projects")
        .header("origin", "http://localhost:4200")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin"),
        Some(&axum::http::HeaderValue::from_static("http://localhost:4200"))
    );
}

#[tokio::test]
async fn answers_preflight_for_any_header() {
    let db = common::setup_db().await.expect("Failed to setup test database");
    let app = common::create_test_app(db);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects/1")
        .header("origin", "http://localhost:4200")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "x-custom-header")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin"),
        Some(&axum::http::HeaderValue::from_static("http://localhost:4200"))
    );
    assert_eq!(
        headers.get("access-control-allow-headers"),
        Some(&axum::http::HeaderValue::from_static("*"))
    );
}

#[tokio::test]
async fn serves_openapi_document() {
    let db = common::setup_db().await.expect("Failed to setup test database");
    let app = common::create_test_app(db);

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let doc = response.json();
    assert!(doc["paths"]["/api/projects"].is_object());
    assert!(doc["paths"]["/api/tasks/{id}"]["delete"].is_object());
}
