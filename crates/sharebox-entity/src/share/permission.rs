//! Share permission level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered capability attached to a share: `VIEW < DOWNLOAD < EDIT`.
///
/// Download requires `Download` or `Edit`; collaborative editing requires
/// `Edit`. Access granted at one level always satisfies every lower level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum SharePermission {
    /// May see metadata and previews only.
    View,
    /// May also retrieve the bytes.
    Download,
    /// May also edit the document collaboratively.
    Edit,
}

impl SharePermission {
    /// Return the capability level (higher = more capable).
    pub fn level(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Download => 2,
            Self::Edit => 3,
        }
    }

    /// Check whether this permission satisfies an operation requiring
    /// `required`.
    pub fn allows(&self, required: SharePermission) -> bool {
        self.level() >= required.level()
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "VIEW"),
            Self::Download => write!(f, "DOWNLOAD"),
            Self::Edit => write!(f, "EDIT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_monotonicity() {
        // Edit satisfies everything below it.
        assert!(SharePermission::Edit.allows(SharePermission::Download));
        assert!(SharePermission::Edit.allows(SharePermission::View));
        assert!(SharePermission::Download.allows(SharePermission::View));

        // Lower levels never satisfy higher requirements.
        assert!(!SharePermission::View.allows(SharePermission::Download));
        assert!(!SharePermission::View.allows(SharePermission::Edit));
        assert!(!SharePermission::Download.allows(SharePermission::Edit));
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&SharePermission::Download).unwrap();
        assert_eq!(json, "\"DOWNLOAD\"");
        let parsed: SharePermission = serde_json::from_str("\"EDIT\"").unwrap();
        assert_eq!(parsed, SharePermission::Edit);
    }
}
