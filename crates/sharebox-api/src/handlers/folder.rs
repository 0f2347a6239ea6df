//! Folder handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::dto::request::CreateFolderRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state
        .folder_service
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
