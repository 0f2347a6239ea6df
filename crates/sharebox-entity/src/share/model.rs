//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::permission::SharePermission;

/// A share granting access to a file or folder.
///
/// Exactly one of `file_id`/`folder_id` is set. A NULL `shared_with`
/// marks a public share, which always carries a `public_token`; a
/// user-targeted share never needs one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// Shared file, if this is a file share.
    pub file_id: Option<Uuid>,
    /// Shared folder, if this is a folder share.
    pub folder_id: Option<Uuid>,
    /// User who granted the share.
    pub shared_by: Uuid,
    /// Recipient user; NULL for public shares.
    pub shared_with: Option<Uuid>,
    /// Permission level granted.
    pub permission: SharePermission,
    /// Opaque bearer token for public shares.
    pub public_token: Option<String>,
    /// When the share expires (NULL = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Whether this is a public (tokened, recipient-less) share.
    pub fn is_public(&self) -> bool {
        self.shared_with.is_none() && self.public_token.is_some()
    }

    /// Whether the share has passed its expiry timestamp.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Data required to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// Shared file.
    pub file_id: Option<Uuid>,
    /// Shared folder.
    pub folder_id: Option<Uuid>,
    /// Granting user.
    pub shared_by: Uuid,
    /// Recipient (None = public).
    pub shared_with: Option<Uuid>,
    /// Permission level.
    pub permission: SharePermission,
    /// Public token (public shares only).
    pub public_token: Option<String>,
    /// Expiry time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn share() -> Share {
        Share {
            id: Uuid::new_v4(),
            file_id: Some(Uuid::new_v4()),
            folder_id: None,
            shared_by: Uuid::new_v4(),
            shared_with: None,
            permission: SharePermission::Download,
            public_token: Some("tok".to_string()),
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_share_detection() {
        let s = share();
        assert!(s.is_public());

        let mut targeted = share();
        targeted.shared_with = Some(Uuid::new_v4());
        targeted.public_token = None;
        assert!(!targeted.is_public());
    }

    #[test]
    fn test_expiry() {
        let mut s = share();
        assert!(!s.is_expired());
        s.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(s.is_expired());
        s.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!s.is_expired());
    }
}
