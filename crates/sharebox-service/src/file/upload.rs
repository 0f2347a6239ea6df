//! Upload validation and object creation.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use sharebox_core::config::LimitsConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::{FileRepository, FolderRepository};
use sharebox_entity::file::model::{CreateFile, File};
use sharebox_entity::folder::tree::folder_path;
use sharebox_storage::key::generate_object_key;
use sharebox_storage::StorageGateway;

use crate::context::RequestContext;

/// One file part extracted from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// Name the client uploaded the file under.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw bytes.
    pub data: Bytes,
}

/// Validates and stores uploaded files.
#[derive(Debug, Clone)]
pub struct UploadService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    storage: Arc<StorageGateway>,
    limits: LimitsConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        storage: Arc<StorageGateway>,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
            limits,
        }
    }

    /// Validate and store a batch of uploaded files.
    ///
    /// Every part is validated before any object is written, so the
    /// first violation aborts the whole batch with nothing stored.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        parts: Vec<UploadPart>,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        if parts.is_empty() {
            return Err(AppError::validation("No files in upload"));
        }

        if let Some(folder) = folder_id {
            let target = self
                .folder_repo
                .find_by_id(folder)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            if target.owner_id != ctx.user_id {
                return Err(AppError::not_found("Folder not found"));
            }
        }

        let mut used = self.file_repo.total_size_for_owner(ctx.user_id).await? as u64;
        for part in &parts {
            validate_part(part, used, &self.limits)?;
            used += part.data.len() as u64;
        }

        // Path is recomputed from the parent chain on every upload so a
        // later folder rename never rewrites existing keys.
        let path = match folder_id {
            Some(folder) => {
                let all = self.folder_repo.find_all_by_owner(ctx.user_id).await?;
                Some(folder_path(&all, folder))
            }
            None => None,
        };

        let mut stored = Vec::with_capacity(parts.len());
        for part in parts {
            let key = generate_object_key(ctx.user_id, path.as_deref(), &part.file_name);
            let size = part.data.len() as i64;

            self.storage
                .put_object(&key, part.data, &part.mime_type)
                .await?;

            let file = match self
                .file_repo
                .create(&CreateFile {
                    name: part.file_name.clone(),
                    original_name: part.file_name.clone(),
                    mime_type: part.mime_type.clone(),
                    size_bytes: size,
                    object_key: key.clone(),
                    folder_id,
                    owner_id: ctx.user_id,
                })
                .await
            {
                Ok(file) => file,
                Err(e) => {
                    // The object exists but its row does not; reclaim it.
                    if let Err(del) = self.storage.delete_object(&key).await {
                        warn!(key = %key, error = %del, "Failed to clean up orphaned object");
                    }
                    return Err(e);
                }
            };

            info!(
                user_id = %ctx.user_id,
                file_id = %file.id,
                size_bytes = size,
                "File uploaded"
            );
            stored.push(file);
        }

        Ok(stored)
    }
}

/// Check one part against the limits, with `used` bytes already stored.
///
/// Violations are reported in a fixed order: size, quota, blocked
/// extension, allow-list.
fn validate_part(part: &UploadPart, used: u64, limits: &LimitsConfig) -> AppResult<()> {
    let size = part.data.len() as u64;

    if size > limits.max_file_size_bytes() {
        return Err(AppError::payload_too_large(format!(
            "'{}' exceeds the {} MB per-file limit",
            part.file_name, limits.max_file_size_mb
        )));
    }

    if used + size > limits.max_storage_bytes() {
        return Err(AppError::quota_exceeded(format!(
            "Storing '{}' would exceed the {} GB storage quota",
            part.file_name, limits.max_storage_gb
        )));
    }

    let ext = file_extension(&part.file_name);

    if let Some(ref ext) = ext {
        if limits.blocked_extensions.iter().any(|b| b == ext) {
            return Err(AppError::unsupported_media_type(format!(
                "Files of type '{ext}' are not allowed"
            )));
        }
    }

    if !limits.allows_any_extension() {
        let allowed = ext
            .as_ref()
            .is_some_and(|e| limits.allowed_extensions.iter().any(|a| a == e));
        if !allowed {
            return Err(AppError::unsupported_media_type(format!(
                "'{}' is not an accepted file type",
                part.file_name
            )));
        }
    }

    Ok(())
}

/// Lowercased extension with leading dot, if the name has one.
fn file_extension(name: &str) -> Option<String> {
    name.rfind('.')
        .filter(|&pos| pos > 0 && pos + 1 < name.len())
        .map(|pos| name[pos..].to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, size: usize) -> UploadPart {
        UploadPart {
            file_name: name.to_string(),
            mime_type: "application/octet-stream".to_string(),
            data: Bytes::from(vec![0u8; size]),
        }
    }

    fn limits() -> LimitsConfig {
        LimitsConfig {
            max_file_size_mb: 1,
            max_storage_gb: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_oversize_rejected() {
        let err = validate_part(&part("big.pdf", 2 * 1024 * 1024), 0, &limits()).unwrap_err();
        assert_eq!(err.kind, sharebox_core::error::ErrorKind::PayloadTooLarge);
    }

    #[test]
    fn test_size_checked_before_extension() {
        // An oversize blocked-extension file reports the size violation.
        let err = validate_part(&part("tool.exe", 2 * 1024 * 1024), 0, &limits()).unwrap_err();
        assert_eq!(err.kind, sharebox_core::error::ErrorKind::PayloadTooLarge);
    }

    #[test]
    fn test_quota_rejected() {
        let l = limits();
        let almost_full = l.max_storage_bytes() - 10;
        let err = validate_part(&part("doc.pdf", 100), almost_full, &l).unwrap_err();
        assert_eq!(err.kind, sharebox_core::error::ErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_blocked_extension_rejected() {
        let err = validate_part(&part("Setup.EXE", 10), 0, &limits()).unwrap_err();
        assert_eq!(
            err.kind,
            sharebox_core::error::ErrorKind::UnsupportedMediaType
        );
    }

    #[test]
    fn test_allow_list_enforced() {
        let l = LimitsConfig {
            allowed_extensions: vec![".pdf".to_string()],
            ..limits()
        };
        assert!(validate_part(&part("doc.pdf", 10), 0, &l).is_ok());

        let err = validate_part(&part("notes.txt", 10), 0, &l).unwrap_err();
        assert_eq!(
            err.kind,
            sharebox_core::error::ErrorKind::UnsupportedMediaType
        );

        // No extension at all cannot match a non-wildcard allow-list.
        let err = validate_part(&part("README", 10), 0, &l).unwrap_err();
        assert_eq!(
            err.kind,
            sharebox_core::error::ErrorKind::UnsupportedMediaType
        );
    }

    #[test]
    fn test_clean_file_accepted() {
        assert!(validate_part(&part("photo.jpg", 1024), 0, &limits()).is_ok());
    }
}
