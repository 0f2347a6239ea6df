//! Route definitions for the Sharebox HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Leave headroom over the per-file limit for multipart framing.
    let body_limit = (state.config.limits.max_file_size_bytes() as usize) + 1024 * 1024;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(share_routes())
        .merge(editor_routes())
        .merge(public_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// SSO login and identity endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sso/callback", post(handlers::auth::sso_callback))
        .route("/auth/me", get(handlers::auth::me))
}

/// File listing, upload, download, delete.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/download", get(handlers::file::download))
}

/// Folder creation and cascade delete.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
}

/// Shares and public links.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/shares", get(handlers::share::list_shares))
        .route("/files/{id}/shares", post(handlers::share::create_share))
        .route(
            "/files/{id}/public-link",
            post(handlers::share::create_public_link),
        )
        .route(
            "/files/{id}/public-link",
            delete(handlers::share::disable_public_link),
        )
        .route("/shares/{id}", delete(handlers::share::revoke_share))
}

/// Document editor integration.
fn editor_routes() -> Router<AppState> {
    Router::new()
        .route("/editor/config", get(handlers::collab::editor_config))
        .route("/editor/callback", post(handlers::collab::editor_callback))
        .route(
            "/editor/download/{id}",
            get(handlers::collab::editor_download),
        )
}

/// Unauthenticated public surface.
fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/public/{token}",
        get(handlers::public::resolve_public_link),
    )
}
