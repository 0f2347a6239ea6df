//! Document editor endpoints: callback contract and token handling.

use axum::http::StatusCode;
use serde_json::json;

use sharebox_entity::user::UserRole;

use crate::helpers::{editor_token, spawn_app, test_config, TEST_EDITOR_SECRET};

const FILE_ID: &str = "3f3e8a60-0000-4000-8000-0000000000aa";

fn callback_uri() -> String {
    format!("/api/editor/callback?file_id={FILE_ID}")
}

fn enabled_config() -> sharebox_core::config::AppConfig {
    let mut config = test_config();
    config.editor.enabled = true;
    config
}

#[tokio::test]
async fn test_callback_when_editing_disabled_reports_error_one() {
    let app = spawn_app(test_config());

    let response = app
        .post(
            &callback_uri(),
            None,
            json!({ "status": 1, "token": editor_token(TEST_EDITOR_SECRET) }),
        )
        .await;

    // The editing server only understands the fixed contract: HTTP 200
    // with {"error":1} on any rejection.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["error"], 1);
}

#[tokio::test]
async fn test_callback_without_token_is_rejected() {
    let app = spawn_app(enabled_config());

    let response = app.post(&callback_uri(), None, json!({ "status": 1 })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["error"], 1);
}

#[tokio::test]
async fn test_callback_with_bad_signature_is_rejected() {
    let app = spawn_app(enabled_config());

    let response = app
        .post(
            &callback_uri(),
            None,
            json!({ "status": 1, "token": editor_token("wrong-secret") }),
        )
        .await;
    assert_eq!(response.body["error"], 1);
}

#[tokio::test]
async fn test_callback_editing_status_acknowledged() {
    let app = spawn_app(enabled_config());

    // Status 1 (editing) requires no persistence, so a verified callback
    // succeeds without any backing services.
    let response = app
        .post(
            &callback_uri(),
            None,
            json!({ "status": 1, "token": editor_token(TEST_EDITOR_SECRET) }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["error"], 0);
}

#[tokio::test]
async fn test_callback_token_accepted_from_authorization_header() {
    let app = spawn_app(enabled_config());
    let token = editor_token(TEST_EDITOR_SECRET);

    let response = app
        .post(&callback_uri(), Some(&token), json!({ "status": 4 }))
        .await;
    assert_eq!(response.body["error"], 0);
}

#[tokio::test]
async fn test_callback_unknown_status_is_rejected() {
    let app = spawn_app(enabled_config());

    let response = app
        .post(
            &callback_uri(),
            None,
            json!({ "status": 5, "token": editor_token(TEST_EDITOR_SECRET) }),
        )
        .await;
    assert_eq!(response.body["error"], 1);
}

#[tokio::test]
async fn test_editor_config_forbidden_when_disabled() {
    let app = spawn_app(test_config());
    let token = app.access_token(UserRole::User);

    let response = app
        .get(
            &format!("/api/editor/config?file_id={FILE_ID}"),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_editor_download_forbidden_when_disabled() {
    let app = spawn_app(test_config());

    // Even a syntactically plausible token dies at the feature gate, so
    // tokens issued before the editor was switched off stop working.
    let response = app
        .get(
            &format!("/api/editor/download/{FILE_ID}?token=left-over-token"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_editor_download_rejects_garbage_token() {
    let app = spawn_app(enabled_config());

    let response = app
        .get(
            &format!("/api/editor/download/{FILE_ID}?token=not-a-jwt"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_editor_download_rejects_access_token() {
    let app = spawn_app(enabled_config());
    // A session token must not double as a file download token.
    let token = app.access_token(UserRole::Admin);

    let response = app
        .get(
            &format!("/api/editor/download/{FILE_ID}?token={token}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
