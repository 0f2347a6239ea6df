//! Router surface: health, unknown routes, method mismatches.

use axum::http::StatusCode;

use crate::helpers::{spawn_app, test_config};

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = spawn_app(test_config());

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["database"], false);
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = spawn_app(test_config());

    let response = app.get("/api/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = spawn_app(test_config());

    let response = app
        .request(axum::http::Method::DELETE, "/api/health", None, None)
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_routes_live_under_api_prefix() {
    let app = spawn_app(test_config());

    // Same path without the /api prefix must not resolve.
    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
