//! Authentication and SSO configuration.

use serde::{Deserialize, Serialize};

/// Authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for internal access tokens and editor download tokens.
    pub jwt_secret: String,
    /// Internal access token TTL in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,
    /// External identity provider settings.
    pub sso: SsoConfig,
}

/// OIDC identity provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsoConfig {
    /// Base URL of the identity provider.
    pub base_url: String,
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret (server-side only).
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
}

fn default_token_ttl_hours() -> u32 {
    168 // 7 days
}
