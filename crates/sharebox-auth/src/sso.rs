//! SSO login flow against the corporate identity provider.
//!
//! Standard authorization-code exchange: the frontend redirects the user
//! to the provider, receives a code, and posts it here. We swap the code
//! for a provider access token, fetch the user profile, and provision a
//! local user row from it on every login.

use serde::{Deserialize, Serialize};
use tracing::info;

use sharebox_core::config::SsoConfig;
use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_entity::user::UserRole;

/// Client for the identity provider's token and userinfo endpoints.
#[derive(Debug, Clone)]
pub struct SsoClient {
    http: reqwest::Client,
    config: SsoConfig,
}

/// Token response from the provider's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// User profile returned by the provider's userinfo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsoUserInfo {
    /// Stable subject identifier at the provider.
    pub sub: String,
    /// Email address.
    pub email: String,
    /// Preferred username, if the provider exposes one.
    pub preferred_username: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub picture: Option<String>,
    /// Machine-readable role slug.
    pub role: Option<String>,
    /// Human-readable role label.
    pub role_name: Option<String>,
}

impl SsoClient {
    /// Create a new SSO client.
    pub fn new(config: SsoConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange an authorization code for a provider access token.
    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let url = format!("{}/oauth/token", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", &self.config.redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "SSO token request failed", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized("SSO code exchange rejected"));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Invalid SSO token response", e)
        })?;
        Ok(token.access_token)
    }

    /// Fetch the user profile with a provider access token.
    pub async fn fetch_userinfo(&self, access_token: &str) -> AppResult<SsoUserInfo> {
        let url = format!("{}/userinfo", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "SSO userinfo request failed", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized("SSO userinfo rejected"));
        }

        let info: SsoUserInfo = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Invalid SSO userinfo response", e)
        })?;
        info!(sub = %info.sub, email = %info.email, "Fetched SSO user profile");
        Ok(info)
    }
}

/// Map provider role fields to a local role.
///
/// The `role` slug is matched exactly; the free-form `role_name` label is
/// matched by substring as a fallback. Anything unrecognized lands on the
/// regular user role.
pub fn map_role(role: Option<&str>, role_name: Option<&str>) -> UserRole {
    if let Some(slug) = role {
        match slug.to_lowercase().as_str() {
            "superadmin" | "super_admin" => return UserRole::Superadmin,
            "admin" | "administrator" => return UserRole::Admin,
            _ => {}
        }
    }
    if let Some(label) = role_name {
        let label = label.to_lowercase();
        if label.contains("superadmin") || label.contains("super admin") {
            return UserRole::Superadmin;
        }
        if label.contains("admin") {
            return UserRole::Admin;
        }
    }
    UserRole::User
}

impl SsoUserInfo {
    /// Resolve the local role for this profile.
    pub fn mapped_role(&self) -> UserRole {
        map_role(self.role.as_deref(), self.role_name.as_deref())
    }

    /// Username to store locally, falling back to the email local part.
    pub fn username(&self) -> String {
        self.preferred_username.clone().unwrap_or_else(|| {
            self.email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_slug_exact_match() {
        assert_eq!(map_role(Some("superadmin"), None), UserRole::Superadmin);
        assert_eq!(map_role(Some("super_admin"), None), UserRole::Superadmin);
        assert_eq!(map_role(Some("ADMIN"), None), UserRole::Admin);
        assert_eq!(map_role(Some("administrator"), None), UserRole::Admin);
        assert_eq!(map_role(Some("member"), None), UserRole::User);
    }

    #[test]
    fn test_role_name_substring_fallback() {
        assert_eq!(
            map_role(None, Some("System Administrator")),
            UserRole::Admin
        );
        assert_eq!(
            map_role(None, Some("Global Super Admin")),
            UserRole::Superadmin
        );
        assert_eq!(map_role(None, Some("Engineer")), UserRole::User);
    }

    #[test]
    fn test_role_slug_wins_over_label() {
        // An unrecognized slug still lets the label decide.
        assert_eq!(
            map_role(Some("staff"), Some("Administrator")),
            UserRole::Admin
        );
        // A recognized slug short-circuits.
        assert_eq!(
            map_role(Some("admin"), Some("Super Admin")),
            UserRole::Admin
        );
    }

    #[test]
    fn test_username_fallback() {
        let info = SsoUserInfo {
            sub: "x".into(),
            email: "jdoe@corp.test".into(),
            preferred_username: None,
            name: None,
            picture: None,
            role: None,
            role_name: None,
        };
        assert_eq!(info.username(), "jdoe");
    }
}
