//! SSO login flow and user lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sharebox_auth::jwt::JwtEncoder;
use sharebox_auth::sso::SsoClient;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::UserRepository;
use sharebox_entity::user::model::{CreateUser, User};

/// Result of a completed SSO login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The provisioned (or refreshed) local user.
    pub user: User,
    /// Internal access token for subsequent API calls.
    pub access_token: String,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

/// Provisions users from the identity provider and issues tokens.
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    sso: Arc<SsoClient>,
    encoder: Arc<JwtEncoder>,
    provider_name: String,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("provider_name", &self.provider_name)
            .finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        sso: Arc<SsoClient>,
        encoder: Arc<JwtEncoder>,
        provider_name: String,
    ) -> Self {
        Self {
            user_repo,
            sso,
            encoder,
            provider_name,
        }
    }

    /// Complete an SSO login: exchange the code, fetch the profile,
    /// upsert the local user, and issue an internal access token.
    pub async fn sso_login(&self, code: &str) -> AppResult<LoginResult> {
        let provider_token = self.sso.exchange_code(code).await?;
        let profile = self.sso.fetch_userinfo(&provider_token).await?;

        let role = profile.mapped_role();
        let user = self
            .user_repo
            .upsert_sso(&CreateUser {
                email: profile.email.clone(),
                username: profile.username(),
                name: profile.name.clone(),
                avatar: profile.picture.clone(),
                role,
                sso_provider: Some(self.provider_name.clone()),
                sso_id: Some(profile.sub.clone()),
            })
            .await?;

        let (access_token, expires_at) =
            self.encoder
                .generate_access_token(user.id, user.role, &user.email)?;

        info!(user_id = %user.id, role = %user.role, "SSO login completed");
        Ok(LoginResult {
            user,
            access_token,
            expires_at,
        })
    }

    /// Fetch a user by ID.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
