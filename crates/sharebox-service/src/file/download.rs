//! Download URL minting.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use sharebox_core::result::AppResult;
use sharebox_entity::share::SharePermission;
use sharebox_storage::StorageGateway;

use crate::context::RequestContext;
use crate::share::AccessService;

/// Hands out presigned download URLs.
///
/// The presigned URL is the only route by which file bytes ever reach a
/// browser; nothing in the app tier streams download bodies.
#[derive(Debug, Clone)]
pub struct DownloadService {
    access: Arc<AccessService>,
    storage: Arc<StorageGateway>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(access: Arc<AccessService>, storage: Arc<StorageGateway>) -> Self {
        Self { access, storage }
    }

    /// Authorize at DOWNLOAD level and mint a presigned URL.
    pub async fn download_url(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<String> {
        let (file, _) = self
            .access
            .authorize_file(ctx, file_id, SharePermission::Download)
            .await?;

        let url = self
            .storage
            .presign_download(&file.object_key, &file.original_name)
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "Download URL issued");
        Ok(url)
    }
}
