//! CORS integration tests.
//!
//! Run with: `cargo test -p videocloud-api --test cors_test`

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{setup_test_app, FakeInvoker, FakeStorage};

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let app = setup_test_app(FakeStorage::new(), FakeInvoker::default());

    let response = app
        .client()
        .method(Method::OPTIONS, "/render")
        .add_header("Origin", "http://localhost:3000")
        .add_header("Access-Control-Request-Method", "POST")
        .add_header("Access-Control-Request-Headers", "content-type")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_unknown_origin_gets_no_allow_header() {
    let app = setup_test_app(FakeStorage::new(), FakeInvoker::default());

    let response = app
        .client()
        .get("/")
        .add_header("Origin", "http://evil.example")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
