//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use sharebox_auth::jwt::{JwtDecoder, JwtEncoder};
use sharebox_auth::sso::SsoClient;
use sharebox_core::config::AppConfig;
use sharebox_database::repositories::{
    FileRepository, FolderRepository, ShareRepository, UserRepository,
};
use sharebox_service::collab::{CallbackService, EditorConfigService};
use sharebox_service::file::{DownloadService, FileService, UploadService};
use sharebox_service::folder::FolderService;
use sharebox_service::share::{AccessService, ShareService};
use sharebox_service::user::UserService;
use sharebox_storage::StorageGateway;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Object-store gateway.
    pub storage: Arc<StorageGateway>,

    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// File repository.
    pub file_repo: Arc<FileRepository>,

    /// SSO login and user lookup.
    pub user_service: Arc<UserService>,
    /// Folder tree management.
    pub folder_service: Arc<FolderService>,
    /// File metadata and deletion.
    pub file_service: Arc<FileService>,
    /// Upload validation and storage.
    pub upload_service: Arc<UploadService>,
    /// Presigned download URLs.
    pub download_service: Arc<DownloadService>,
    /// Shares and public links.
    pub share_service: Arc<ShareService>,
    /// File access resolution.
    pub access_service: Arc<AccessService>,
    /// Editor launch configuration.
    pub editor_config_service: Arc<EditorConfigService>,
    /// Editor callback handling.
    pub callback_service: Arc<CallbackService>,
}

impl AppState {
    /// Wire the full dependency graph from config, pool, and gateway.
    pub fn build(config: Arc<AppConfig>, db_pool: PgPool, storage: Arc<StorageGateway>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
        let file_repo = Arc::new(FileRepository::new(db_pool.clone()));
        let share_repo = Arc::new(ShareRepository::new(db_pool.clone()));

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let sso_client = Arc::new(SsoClient::new(config.auth.sso.clone()));

        let access_service = Arc::new(AccessService::new(file_repo.clone(), share_repo.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            sso_client,
            jwt_encoder.clone(),
            "corporate-sso".to_string(),
        ));
        let folder_service = Arc::new(FolderService::new(
            folder_repo.clone(),
            file_repo.clone(),
            share_repo.clone(),
            storage.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            file_repo.clone(),
            share_repo.clone(),
            storage.clone(),
            access_service.clone(),
        ));
        let upload_service = Arc::new(UploadService::new(
            file_repo.clone(),
            folder_repo.clone(),
            storage.clone(),
            config.limits.clone(),
        ));
        let download_service = Arc::new(DownloadService::new(
            access_service.clone(),
            storage.clone(),
        ));
        let share_service = Arc::new(ShareService::new(
            share_repo,
            file_repo.clone(),
            folder_repo,
            user_repo.clone(),
            storage.clone(),
            config.sharing.clone(),
            config.server.public_url.clone(),
        ));
        let editor_config_service = Arc::new(EditorConfigService::new(
            access_service.clone(),
            user_repo.clone(),
            jwt_encoder.clone(),
            config.editor.clone(),
            config.server.public_url.clone(),
        ));
        let callback_service = Arc::new(CallbackService::new(
            file_repo.clone(),
            storage.clone(),
            config.editor.clone(),
        ));

        Self {
            config,
            db_pool,
            storage,
            jwt_encoder,
            jwt_decoder,
            user_repo,
            file_repo,
            user_service,
            folder_service,
            file_service,
            upload_service,
            download_service,
            share_service,
            access_service,
            editor_config_service,
            callback_service,
        }
    }
}
