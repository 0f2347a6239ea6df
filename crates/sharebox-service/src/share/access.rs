//! Access resolution for files.
//!
//! Resolution order: owner, then administrative role, then an active
//! share targeted at the requester with a sufficient permission level.
//! Anything else resolves to NotFound rather than Forbidden, so callers
//! cannot probe for the existence of files they were never shown.

use std::sync::Arc;

use uuid::Uuid;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::{FileRepository, ShareRepository};
use sharebox_entity::file::File;
use sharebox_entity::share::{Share, SharePermission};
use sharebox_entity::user::UserRole;

use crate::context::RequestContext;

/// How a request was granted access to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Requester owns the file.
    Owner,
    /// Requester holds an administrative role.
    Admin,
    /// Requester holds a share at this permission level.
    Shared(SharePermission),
}

impl AccessDecision {
    /// Whether this grant satisfies the given permission level.
    pub fn allows(&self, required: SharePermission) -> bool {
        match self {
            Self::Owner | Self::Admin => true,
            Self::Shared(p) => p.allows(required),
        }
    }
}

/// Resolves what a requester may do with a file.
#[derive(Debug, Clone)]
pub struct AccessService {
    file_repo: Arc<FileRepository>,
    share_repo: Arc<ShareRepository>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(file_repo: Arc<FileRepository>, share_repo: Arc<ShareRepository>) -> Self {
        Self {
            file_repo,
            share_repo,
        }
    }

    /// Load a file and check the requester holds `required` access to it.
    ///
    /// Insufficient or absent access both return NotFound.
    pub async fn authorize_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        required: SharePermission,
    ) -> AppResult<(File, AccessDecision)> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let share = if file.owner_id == ctx.user_id || ctx.is_admin() {
            None
        } else {
            self.share_repo
                .find_for_recipient(file_id, ctx.user_id)
                .await?
        };

        match resolve(&file, ctx.user_id, ctx.role, share.as_ref()) {
            Some(decision) if decision.allows(required) => Ok((file, decision)),
            _ => Err(AppError::not_found("File not found")),
        }
    }
}

/// Pure resolution step, separated from I/O for testability.
pub fn resolve(
    file: &File,
    requester: Uuid,
    role: UserRole,
    share: Option<&Share>,
) -> Option<AccessDecision> {
    if file.owner_id == requester {
        return Some(AccessDecision::Owner);
    }
    if role.is_admin() {
        return Some(AccessDecision::Admin);
    }
    match share {
        Some(s) if s.shared_with == Some(requester) && !s.is_expired() => {
            Some(AccessDecision::Shared(s.permission))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn file(owner: Uuid) -> File {
        File {
            id: Uuid::new_v4(),
            name: "f.docx".into(),
            original_name: "f.docx".into(),
            mime_type: "application/octet-stream".into(),
            size_bytes: 1,
            object_key: "k".into(),
            folder_id: None,
            owner_id: owner,
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn share_for(file_id: Uuid, recipient: Uuid, permission: SharePermission) -> Share {
        Share {
            id: Uuid::new_v4(),
            file_id: Some(file_id),
            folder_id: None,
            shared_by: Uuid::new_v4(),
            shared_with: Some(recipient),
            permission,
            public_token: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_and_admin_get_full_access() {
        let owner = Uuid::new_v4();
        let f = file(owner);
        assert_eq!(
            resolve(&f, owner, UserRole::User, None),
            Some(AccessDecision::Owner)
        );

        let admin = Uuid::new_v4();
        assert_eq!(
            resolve(&f, admin, UserRole::Admin, None),
            Some(AccessDecision::Admin)
        );
        assert_eq!(
            resolve(&f, admin, UserRole::Superadmin, None),
            Some(AccessDecision::Admin)
        );
    }

    #[test]
    fn test_share_grants_its_level() {
        let f = file(Uuid::new_v4());
        let viewer = Uuid::new_v4();
        let s = share_for(f.id, viewer, SharePermission::View);

        let decision = resolve(&f, viewer, UserRole::User, Some(&s)).unwrap();
        assert!(decision.allows(SharePermission::View));
        assert!(!decision.allows(SharePermission::Download));
        assert!(!decision.allows(SharePermission::Edit));
    }

    #[test]
    fn test_permission_upgrade_unlocks_download() {
        let f = file(Uuid::new_v4());
        let viewer = Uuid::new_v4();
        let mut s = share_for(f.id, viewer, SharePermission::View);
        assert!(!resolve(&f, viewer, UserRole::User, Some(&s))
            .unwrap()
            .allows(SharePermission::Download));

        s.permission = SharePermission::Download;
        assert!(resolve(&f, viewer, UserRole::User, Some(&s))
            .unwrap()
            .allows(SharePermission::Download));
    }

    #[test]
    fn test_stranger_and_expired_share_get_nothing() {
        let f = file(Uuid::new_v4());
        let stranger = Uuid::new_v4();
        assert_eq!(resolve(&f, stranger, UserRole::User, None), None);

        let mut s = share_for(f.id, stranger, SharePermission::Edit);
        s.expires_at = Some(Utc::now() - Duration::hours(1));
        assert_eq!(resolve(&f, stranger, UserRole::User, Some(&s)), None);
    }
}
