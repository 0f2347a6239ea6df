//! File metadata access and deletion.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::{FileRepository, ShareRepository};
use sharebox_entity::file::File;
use sharebox_entity::share::SharePermission;
use sharebox_storage::StorageGateway;

use crate::context::RequestContext;
use crate::share::AccessService;

/// File metadata reads and deletion.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<FileRepository>,
    share_repo: Arc<ShareRepository>,
    storage: Arc<StorageGateway>,
    access: Arc<AccessService>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        share_repo: Arc<ShareRepository>,
        storage: Arc<StorageGateway>,
        access: Arc<AccessService>,
    ) -> Self {
        Self {
            file_repo,
            share_repo,
            storage,
            access,
        }
    }

    /// Fetch a file's metadata; VIEW-level access is enough.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let (file, _) = self
            .access
            .authorize_file(ctx, file_id, SharePermission::View)
            .await?;
        Ok(file)
    }

    /// Delete a file: backing object first (best-effort), then its
    /// shares, then the row itself.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if file.owner_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::not_found("File not found"));
        }

        if let Err(e) = self.storage.delete_object(&file.object_key).await {
            warn!(
                file_id = %file.id,
                error = %e,
                "Failed to delete backing object, removing metadata anyway"
            );
        }

        self.share_repo.delete_for_file(file.id).await?;
        self.file_repo.delete(file.id).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted");
        Ok(())
    }
}
