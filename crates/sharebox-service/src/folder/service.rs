//! Folder CRUD, breadcrumb listing, and cascade delete.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use sharebox_entity::file::File;
use sharebox_entity::folder::model::{CreateFolder, Folder};
use sharebox_entity::folder::tree::{breadcrumb_trail, deepest_first, Breadcrumb};
use sharebox_storage::StorageGateway;

use crate::context::RequestContext;

/// One level of the folder tree, as shown in the file browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// Direct child folders.
    pub folders: Vec<Folder>,
    /// Files at this level.
    pub files: Vec<File>,
    /// Ancestry from root to the current folder (empty at root level).
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Everything one folder cascade must remove, computed up front from the
/// owner's flat folder and file sets.
#[derive(Debug)]
struct CascadePlan {
    /// Folder rows to delete, children before parents.
    folder_ids: Vec<Uuid>,
    /// File rows (and their backing objects) inside those folders.
    files: Vec<File>,
}

fn cascade_plan(folders: &[Folder], files: &[File], root: Uuid) -> CascadePlan {
    let folder_ids = deepest_first(folders, root);
    let doomed: HashSet<Uuid> = folder_ids.iter().copied().collect();
    let files = files
        .iter()
        .filter(|f| f.folder_id.is_some_and(|id| doomed.contains(&id)))
        .cloned()
        .collect();
    CascadePlan { folder_ids, files }
}

/// Manages the folder tree of each user.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
    share_repo: Arc<ShareRepository>,
    storage: Arc<StorageGateway>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        share_repo: Arc<ShareRepository>,
        storage: Arc<StorageGateway>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            share_repo,
            storage,
        }
    }

    /// Create a folder under an optional parent.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }

        if let Some(parent) = parent_id {
            let parent_folder = self
                .folder_repo
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
            if parent_folder.owner_id != ctx.user_id {
                return Err(AppError::not_found("Parent folder not found"));
            }
        }

        if self
            .folder_repo
            .exists_sibling(ctx.user_id, parent_id, name)
            .await?
        {
            return Err(AppError::conflict(
                "A folder with this name already exists here",
            ));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    /// List one level of the requester's tree with its breadcrumb trail.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<FolderListing> {
        if let Some(parent) = parent_id {
            let folder = self
                .folder_repo
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            if folder.owner_id != ctx.user_id {
                return Err(AppError::not_found("Folder not found"));
            }
        }

        let folders = self.folder_repo.find_children(ctx.user_id, parent_id).await?;
        let files = self.file_repo.find_in_folder(ctx.user_id, parent_id).await?;

        let breadcrumbs = match parent_id {
            Some(current) => {
                let all = self.folder_repo.find_all_by_owner(ctx.user_id).await?;
                breadcrumb_trail(&all, current)
            }
            None => Vec::new(),
        };

        Ok(FolderListing {
            folders,
            files,
            breadcrumbs,
        })
    }

    /// Delete a folder and everything beneath it.
    ///
    /// Order: backing objects (best-effort), then shares, then file rows,
    /// then folder rows deepest-first so no parent disappears while its
    /// children still reference it. Metadata failures abort; object-store
    /// failures are logged and skipped.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<()> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        if folder.owner_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::not_found("Folder not found"));
        }

        let folders = self.folder_repo.find_all_by_owner(folder.owner_id).await?;
        let files = self.file_repo.find_all_by_owner(folder.owner_id).await?;
        let plan = cascade_plan(&folders, &files, folder_id);

        for file in &plan.files {
            if let Err(e) = self.storage.delete_object(&file.object_key).await {
                warn!(
                    file_id = %file.id,
                    error = %e,
                    "Failed to delete backing object, continuing cascade"
                );
            }
        }

        let file_ids: Vec<Uuid> = plan.files.iter().map(|f| f.id).collect();
        self.share_repo
            .delete_for_resources(&file_ids, &plan.folder_ids)
            .await?;
        self.file_repo.delete_by_folder_ids(&plan.folder_ids).await?;

        for id in &plan.folder_ids {
            self.folder_repo.delete(*id).await?;
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            folders = plan.folder_ids.len(),
            files = plan.files.len(),
            "Folder cascade delete completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn folder(id: Uuid, name: &str, parent: Option<Uuid>, owner: Uuid) -> Folder {
        Folder {
            id,
            name: name.to_string(),
            parent_id: parent,
            owner_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn file_in(folder_id: Option<Uuid>, key: &str, owner: Uuid) -> File {
        File {
            id: Uuid::new_v4(),
            name: key.to_string(),
            original_name: key.to_string(),
            mime_type: "application/octet-stream".to_string(),
            size_bytes: 1,
            object_key: key.to_string(),
            folder_id,
            owner_id: owner,
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cascade_plan_covers_entire_subtree_and_nothing_else() {
        let owner = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let other = Uuid::new_v4();
        let folders = vec![
            folder(a, "a", None, owner),
            folder(b, "b", Some(a), owner),
            folder(c, "c", Some(b), owner),
            folder(other, "other", None, owner),
        ];
        let files = vec![
            file_in(Some(b), "in-b", owner),
            file_in(Some(c), "in-c", owner),
            file_in(None, "at-root", owner),
            file_in(Some(other), "elsewhere", owner),
        ];

        let plan = cascade_plan(&folders, &files, a);

        let folder_set: HashSet<Uuid> = plan.folder_ids.iter().copied().collect();
        assert_eq!(folder_set, HashSet::from([a, b, c]));

        let keys: Vec<&str> = plan.files.iter().map(|f| f.object_key.as_str()).collect();
        assert!(keys.contains(&"in-b"));
        assert!(keys.contains(&"in-c"));
        // Root-level files and other branches survive the cascade.
        assert!(!keys.contains(&"at-root"));
        assert!(!keys.contains(&"elsewhere"));
    }

    #[test]
    fn test_cascade_plan_deletes_children_before_parents() {
        let owner = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let folders = vec![
            folder(a, "a", None, owner),
            folder(b, "b", Some(a), owner),
            folder(c, "c", Some(b), owner),
        ];

        let plan = cascade_plan(&folders, &[], a);
        let pos = |id| plan.folder_ids.iter().position(|&x| x == id).unwrap();
        assert!(pos(c) < pos(b));
        assert!(pos(b) < pos(a));
    }
}
