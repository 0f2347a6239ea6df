//! Sharing surface: public-link policy enforcement at the HTTP layer.

use axum::http::{Method, StatusCode};
use serde_json::json;

use sharebox_entity::user::UserRole;

use crate::helpers::{spawn_app, test_config};

const FILE_ID: &str = "3f3e8a60-0000-4000-8000-0000000000bb";

#[tokio::test]
async fn test_public_link_requires_authentication() {
    let app = spawn_app(test_config());

    let response = app
        .post(&format!("/api/files/{FILE_ID}/public-link"), None, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_link_forbidden_when_sharing_disabled() {
    // test_config disables public sharing; the policy gate fires before
    // ownership is even looked up, so no database is needed.
    let app = spawn_app(test_config());

    for role in [UserRole::User, UserRole::Admin, UserRole::Superadmin] {
        let token = app.access_token(role);
        let response = app
            .post(
                &format!("/api/files/{FILE_ID}/public-link"),
                Some(&token),
                json!({}),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "role: {role:?}");
        assert_eq!(response.body["error"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_revoke_share_requires_authentication() {
    let app = spawn_app(test_config());

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/shares/{FILE_ID}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_resolve_is_unauthenticated() {
    let app = spawn_app(test_config());

    // No 401 here: the endpoint is public. With no reachable database the
    // lookup itself fails server-side.
    let response = app.get("/api/public/abcdef0123456789", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
