//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A Sharebox user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique; also the SSO sync key).
    pub email: String,
    /// Short login name.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Role determining elevated access.
    pub role: UserRole,
    /// External identity provider name, if this account is SSO-linked.
    pub sso_provider: Option<String>,
    /// Subject identifier at the external identity provider.
    pub sso_id: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name falling back to username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

/// Data required to create or sync a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Short login name.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Role.
    pub role: UserRole,
    /// External identity provider name.
    pub sso_provider: Option<String>,
    /// Subject identifier at the provider.
    pub sso_id: Option<String>,
}
