//! JWT claims structures.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharebox_entity::user::UserRole;

/// Purpose tag carried by editor download tokens.
pub const DOWNLOAD_PURPOSE: &str = "editor-download";

/// Claims payload embedded in every API access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// User email for convenience.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Claims for the short-lived token the document editor uses to fetch
/// file bytes. Scoped to one file and one purpose so an access token
/// can never double as a download grant (or vice versa).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadClaims {
    /// The file this token authorizes.
    pub file_id: Uuid,
    /// Fixed purpose tag, always [`DOWNLOAD_PURPOSE`].
    pub purpose: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
