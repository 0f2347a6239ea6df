//! Authentication handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::request::SsoCallbackRequest;
use crate::dto::response::LoginResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/sso/callback
pub async fn sso_callback(
    State(state): State<AppState>,
    Json(req): Json<SsoCallbackRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state.user_service.sso_login(&req.code).await?;

    let body = LoginResponse {
        user: result.user,
        access_token: result.access_token,
        expires_at: result.expires_at,
    };
    Ok(Json(serde_json::json!({ "success": true, "data": body })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.get_user(auth.user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
