//! Unauthenticated public-link handler.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/public/{token}
pub async fn resolve_public_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let view = state.share_service.resolve_public_link(&token).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": view })))
}
