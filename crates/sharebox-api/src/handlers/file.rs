//! File handlers: listing, upload, download, delete.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use sharebox_core::error::AppError;
use sharebox_service::file::UploadPart;

use crate::dto::request::FolderQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files?folder_id=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FolderQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state
        .folder_service
        .list_children(&auth, query.folder_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": listing })))
}

/// POST /api/files/upload (multipart)
///
/// Accepts any number of file parts plus an optional `folder_id` text
/// field, in any order; every field is collected before validation so
/// the batch is accepted or rejected as one.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut parts: Vec<UploadPart> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::validation(format!("Malformed multipart body: {e}"))))?
    {
        match field.name() {
            Some("folder_id") => {
                let text = field.text().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Invalid folder_id field: {e}")))
                })?;
                if !text.is_empty() {
                    folder_id = Some(text.parse().map_err(|_| {
                        ApiError(AppError::validation("folder_id is not a valid UUID"))
                    })?);
                }
            }
            _ => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError(AppError::validation("File part has no name")))?;
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Failed to read file part: {e}")))
                })?;
                parts.push(UploadPart {
                    file_name,
                    mime_type,
                    data,
                });
            }
        }
    }

    let files = state.upload_service.upload(&auth, parts, folder_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": files })))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state.file_service.get_file(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": file })))
}

/// GET /api/files/{id}/download — 302 to a presigned URL.
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let url = state.download_service.download_url(&auth, id).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
