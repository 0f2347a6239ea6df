//! Document editor handlers: launch config, callback, token download.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;
use uuid::Uuid;

use sharebox_core::error::AppError;
use sharebox_service::collab::CallbackPayload;

use crate::dto::request::{DownloadTokenQuery, FileQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/editor/config?file_id=...
pub async fn editor_config(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FileQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let config = state
        .editor_config_service
        .editor_config(&auth, query.file_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": config })))
}

/// POST /api/editor/callback?file_id=...
///
/// The editing server only understands the fixed `{"error":0|1}`
/// contract, so every failure is folded into `{"error":1}` with HTTP 200
/// instead of surfacing as a protocol error.
pub async fn editor_callback(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
    headers: HeaderMap,
    Json(payload): Json<CallbackPayload>,
) -> Json<serde_json::Value> {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match state
        .callback_service
        .handle_callback(query.file_id, &payload, bearer)
        .await
    {
        Ok(()) => Json(serde_json::json!({ "error": 0 })),
        Err(e) => {
            warn!(file_id = %query.file_id, error = %e, "Editor callback rejected");
            Json(serde_json::json!({ "error": 1 }))
        }
    }
}

/// GET /api/editor/download/{id}?token=...
///
/// Authenticated by the scoped download token, not by a user session:
/// it is the editing server, not a browser, calling here. Switching the
/// editor off also cuts off tokens issued before the switch.
pub async fn editor_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DownloadTokenQuery>,
) -> Result<Response, ApiError> {
    if !state.config.editor.enabled {
        return Err(ApiError(AppError::forbidden("Document editing is disabled")));
    }
    state.jwt_decoder.decode_download_token(&query.token, id)?;

    let file = state
        .file_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;

    let url = state
        .storage
        .presign_download(&file.object_key, &file.original_name)
        .await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
