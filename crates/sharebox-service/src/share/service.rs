//! Share CRUD and public-link service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sharebox_core::config::SharingConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::{
    FileRepository, FolderRepository, ShareRepository, UserRepository,
};
use sharebox_entity::file::File;
use sharebox_entity::folder::model::Folder;
use sharebox_entity::share::{CreateShare, Share, SharePermission};
use sharebox_storage::StorageGateway;

use super::link::LinkService;
use crate::context::RequestContext;

/// What an unauthenticated public-link visitor gets to see.
///
/// Either `file` or `folder` is present, matching `resource_type`.
/// Folder links additionally carry the folder's file listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicLinkView {
    /// `"file"` or `"folder"`.
    pub resource_type: String,
    /// The shared file, for file links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    /// The shared folder, for folder links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<Folder>,
    /// Files inside the shared folder.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    /// Display name of the owner.
    pub owner: String,
    /// Permission granted by the link.
    pub permission: SharePermission,
    /// Presigned download URL; only on file links that allow download.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl PublicLinkView {
    fn for_file(
        file: File,
        owner: String,
        permission: SharePermission,
        download_url: Option<String>,
    ) -> Self {
        Self {
            resource_type: "file".to_string(),
            file: Some(file),
            folder: None,
            files: Vec::new(),
            owner,
            permission,
            download_url,
        }
    }

    fn for_folder(
        folder: Folder,
        files: Vec<File>,
        owner: String,
        permission: SharePermission,
    ) -> Self {
        Self {
            resource_type: "folder".to_string(),
            file: None,
            folder: Some(folder),
            files,
            owner,
            permission,
            // Folder contents are fetched file by file, never as one URL.
            download_url: None,
        }
    }
}

/// How a public link is persisted: refresh the row that already exists,
/// or insert the first one. There is never a second public row per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublicLinkAction {
    Rotate { share_id: Uuid },
    Insert,
}

fn public_link_action(existing: Option<&Share>) -> PublicLinkAction {
    match existing {
        Some(share) => PublicLinkAction::Rotate { share_id: share.id },
        None => PublicLinkAction::Insert,
    }
}

/// Manages user-targeted shares and public links.
#[derive(Debug, Clone)]
pub struct ShareService {
    share_repo: Arc<ShareRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
    storage: Arc<StorageGateway>,
    link_service: LinkService,
    sharing: SharingConfig,
    public_url: String,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        storage: Arc<StorageGateway>,
        sharing: SharingConfig,
        public_url: String,
    ) -> Self {
        Self {
            share_repo,
            file_repo,
            folder_repo,
            user_repo,
            storage,
            link_service: LinkService::new(),
            sharing,
            public_url,
        }
    }

    /// Grant (or upgrade) a user-targeted share on a file.
    ///
    /// Upsert keyed on (file, recipient): granting again replaces the
    /// permission instead of stacking rows.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        recipient_id: Uuid,
        permission: SharePermission,
    ) -> AppResult<Share> {
        if recipient_id == ctx.user_id {
            return Err(AppError::validation("Cannot share a file with yourself"));
        }

        let file = self.owned_file(ctx, file_id).await?;

        self.user_repo
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipient not found"))?;

        let share = match self
            .share_repo
            .find_for_recipient(file.id, recipient_id)
            .await?
        {
            Some(existing) => self
                .share_repo
                .update_permission(existing.id, permission)
                .await?
                .ok_or_else(|| AppError::not_found("Share not found"))?,
            None => {
                self.share_repo
                    .create(&CreateShare {
                        file_id: Some(file.id),
                        folder_id: None,
                        shared_by: ctx.user_id,
                        shared_with: Some(recipient_id),
                        permission,
                        public_token: None,
                        expires_at: None,
                    })
                    .await?
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            recipient = %recipient_id,
            permission = %permission,
            "Share granted"
        );
        Ok(share)
    }

    /// List all shares on a file. Owner only.
    pub async fn list_shares(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<Vec<Share>> {
        let file = self.owned_file(ctx, file_id).await?;
        self.share_repo.find_for_file(file.id).await
    }

    /// Revoke a share. Granter and recipient may both revoke.
    pub async fn revoke_share(&self, ctx: &RequestContext, share_id: Uuid) -> AppResult<()> {
        let share = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.shared_by != ctx.user_id && share.shared_with != Some(ctx.user_id) {
            return Err(AppError::not_found("Share not found"));
        }

        self.share_repo.delete(share.id).await?;
        info!(user_id = %ctx.user_id, share_id = %share_id, "Share revoked");
        Ok(())
    }

    /// Create (or refresh) the public link of a file.
    ///
    /// Reuses the existing public-share row, regenerating its token, so
    /// repeated calls keep exactly one public share per file.
    pub async fn create_public_link(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> AppResult<(Share, String)> {
        // Gate before touching any store; when the feature is off it is
        // off for every caller, owner and admin alike.
        if !self.sharing.allow_public {
            return Err(AppError::forbidden("Public sharing is disabled"));
        }

        let file = self.owned_file(ctx, file_id).await?;
        let token = self.link_service.generate_token();

        let existing = self.share_repo.find_public_for_file(file.id).await?;
        let share = match public_link_action(existing.as_ref()) {
            PublicLinkAction::Rotate { share_id } => self
                .share_repo
                .rotate_token(share_id, &token, existing.and_then(|s| s.expires_at))
                .await?
                .ok_or_else(|| AppError::not_found("Share not found"))?,
            PublicLinkAction::Insert => {
                self.share_repo
                    .create(&CreateShare {
                        file_id: Some(file.id),
                        folder_id: None,
                        shared_by: ctx.user_id,
                        shared_with: None,
                        permission: SharePermission::Download,
                        public_token: Some(token.clone()),
                        expires_at: None,
                    })
                    .await?
            }
        };

        self.file_repo.set_public(file.id, true).await?;

        let url = self.public_link_url(share.public_token.as_deref().unwrap_or(&token));
        info!(user_id = %ctx.user_id, file_id = %file.id, "Public link issued");
        Ok((share, url))
    }

    /// Remove the public link of a file.
    pub async fn disable_public_link(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.owned_file(ctx, file_id).await?;

        if let Some(share) = self.share_repo.find_public_for_file(file.id).await? {
            self.share_repo.delete(share.id).await?;
        }
        self.file_repo.set_public(file.id, false).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, "Public link removed");
        Ok(())
    }

    /// Resolve a public token for an unauthenticated visitor.
    ///
    /// Unknown token → NotFound; expired → Gone. File links expose a
    /// download URL only when the permission allows downloading; folder
    /// links return the folder plus its file listing.
    pub async fn resolve_public_link(&self, token: &str) -> AppResult<PublicLinkView> {
        let share = self
            .share_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        if share.is_expired() {
            return Err(AppError::gone("This link has expired"));
        }

        if let Some(file_id) = share.file_id {
            let file = self
                .file_repo
                .find_by_id(file_id)
                .await?
                .ok_or_else(|| AppError::not_found("Link not found"))?;
            let owner = self.owner_name(file.owner_id).await?;

            let download_url = if share.permission.allows(SharePermission::Download) {
                Some(
                    self.storage
                        .presign_download(&file.object_key, &file.original_name)
                        .await?,
                )
            } else {
                None
            };

            Ok(PublicLinkView::for_file(
                file,
                owner,
                share.permission,
                download_url,
            ))
        } else if let Some(folder_id) = share.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Link not found"))?;
            let files = self
                .file_repo
                .find_in_folder(folder.owner_id, Some(folder.id))
                .await?;
            let owner = self.owner_name(folder.owner_id).await?;

            Ok(PublicLinkView::for_folder(
                folder,
                files,
                owner,
                share.permission,
            ))
        } else {
            Err(AppError::not_found("Link not found"))
        }
    }

    async fn owner_name(&self, owner_id: Uuid) -> AppResult<String> {
        Ok(self
            .user_repo
            .find_by_id(owner_id)
            .await?
            .map(|u| u.display_name().to_string())
            .unwrap_or_default())
    }

    /// Browser-facing URL for a public token.
    fn public_link_url(&self, token: &str) -> String {
        format!("{}/public/{token}", self.public_url.trim_end_matches('/'))
    }

    /// Load a file and require the requester to be its owner.
    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if file.owner_id != ctx.user_id {
            return Err(AppError::not_found("File not found"));
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharebox_core::error::ErrorKind;
    use sharebox_entity::user::UserRole;
    use std::time::Duration;

    fn service(allow_public: bool) -> ShareService {
        // Lazy pool: never actually connects, which is fine because the
        // public-sharing gate must fire before any query is issued.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/sharebox_test")
            .unwrap();
        let client = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::new()
                .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                .region(aws_sdk_s3::config::Region::new("us-east-1"))
                .build(),
        );
        ShareService::new(
            Arc::new(ShareRepository::new(pool.clone())),
            Arc::new(FileRepository::new(pool.clone())),
            Arc::new(FolderRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            Arc::new(StorageGateway::from_client(
                client,
                "test".into(),
                Duration::from_secs(60),
            )),
            SharingConfig { allow_public },
            "https://sharebox.corp.test".into(),
        )
    }

    fn public_share() -> Share {
        Share {
            id: Uuid::new_v4(),
            file_id: Some(Uuid::new_v4()),
            folder_id: None,
            shared_by: Uuid::new_v4(),
            shared_with: None,
            permission: SharePermission::Download,
            public_token: Some("existing-token".to_string()),
            expires_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn file_entity(name: &str, folder_id: Option<Uuid>) -> File {
        File {
            id: Uuid::new_v4(),
            name: name.to_string(),
            original_name: name.to_string(),
            mime_type: "application/octet-stream".to_string(),
            size_bytes: 1,
            object_key: format!("k/{name}"),
            folder_id,
            owner_id: Uuid::new_v4(),
            is_public: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn folder_entity(name: &str) -> Folder {
        Folder {
            id: Uuid::new_v4(),
            name: name.to_string(),
            parent_id: None,
            owner_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_public_link_forbidden_when_sharing_disabled() {
        let svc = service(false);
        let ctx = RequestContext::new(Uuid::new_v4(), UserRole::User, "a@corp.test".into());

        let err = svc
            .create_public_link(&ctx, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // Admins get the same refusal.
        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Superadmin, "s@corp.test".into());
        let err = svc
            .create_public_link(&admin, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_token_regeneration_targets_the_one_existing_row() {
        // First link: nothing exists yet, a row must be inserted.
        assert_eq!(public_link_action(None), PublicLinkAction::Insert);

        // Every regeneration afterwards rotates that same row instead of
        // inserting a second public share for the file.
        let row = public_share();
        assert_eq!(
            public_link_action(Some(&row)),
            PublicLinkAction::Rotate { share_id: row.id }
        );
        assert_eq!(
            public_link_action(Some(&row)),
            PublicLinkAction::Rotate { share_id: row.id }
        );
    }

    #[test]
    fn test_file_link_view_carries_download_url() {
        let view = PublicLinkView::for_file(
            file_entity("report.pdf", None),
            "Dana Ops".to_string(),
            SharePermission::Download,
            Some("https://store.example/presigned".to_string()),
        );

        assert_eq!(view.resource_type, "file");
        assert!(view.file.is_some());
        assert!(view.folder.is_none());
        assert!(view.files.is_empty());
        assert!(view.download_url.is_some());
    }

    #[test]
    fn test_folder_link_view_lists_contents_without_download_url() {
        let folder = folder_entity("handover");
        let files = vec![
            file_entity("a.txt", Some(folder.id)),
            file_entity("b.txt", Some(folder.id)),
        ];
        let view = PublicLinkView::for_folder(
            folder,
            files,
            "Dana Ops".to_string(),
            SharePermission::View,
        );

        assert_eq!(view.resource_type, "folder");
        assert!(view.file.is_none());
        assert!(view.folder.is_some());
        assert_eq!(view.files.len(), 2);
        assert!(view.download_url.is_none());

        // The serialized form drops the unset file/download fields.
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("file").is_none());
        assert!(json.get("download_url").is_none());
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_public_link_url_shape() {
        let svc = service(true);
        assert_eq!(
            svc.public_link_url("abc123"),
            "https://sharebox.corp.test/public/abc123"
        );
    }
}
