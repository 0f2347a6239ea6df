//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_entity::user::model::{CreateUser, User};

/// Repository for user lookup and SSO provisioning.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Insert or refresh a user row from an SSO login.
    ///
    /// Keyed on (sso_provider, sso_id); profile fields and the mapped role
    /// are updated on every login so the directory stays current.
    pub async fn upsert_sso(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, username, name, avatar, role, sso_provider, sso_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (sso_provider, sso_id) DO UPDATE SET \
             email = EXCLUDED.email, username = EXCLUDED.username, name = EXCLUDED.name, \
             avatar = EXCLUDED.avatar, role = EXCLUDED.role, updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.name)
        .bind(&data.avatar)
        .bind(data.role)
        .bind(&data.sso_provider)
        .bind(&data.sso_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert user", e))
    }
}
