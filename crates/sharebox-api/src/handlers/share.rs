//! Share and public-link handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::PublicLinkResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files/{id}/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shares = state.share_service.list_shares(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}

/// POST /api/files/{id}/shares
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state
        .share_service
        .create_share(&auth, id, req.user_id, req.permission)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// DELETE /api/shares/{id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.share_service.revoke_share(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/files/{id}/public-link
pub async fn create_public_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (share, url) = state.share_service.create_public_link(&auth, id).await?;
    let body = PublicLinkResponse { share, url };
    Ok(Json(serde_json::json!({ "success": true, "data": body })))
}

/// DELETE /api/files/{id}/public-link
pub async fn disable_public_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.share_service.disable_public_link(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
