//! Typed response DTOs for the payloads that are more than a plain
//! entity echo.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sharebox_entity::share::Share;
use sharebox_entity::user::User;

/// Body of a successful SSO login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// The logged-in user.
    pub user: User,
    /// Internal API access token.
    pub access_token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Body of a public-link creation.
#[derive(Debug, Clone, Serialize)]
pub struct PublicLinkResponse {
    /// The public share row.
    pub share: Share,
    /// Browser-facing link URL.
    pub url: String,
}
