//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_entity::share::model::{CreateShare, Share};
use sharebox_entity::share::permission::SharePermission;

/// Repository for share CRUD and public-token lookup.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find a share by its public token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE public_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by token", e)
            })
    }

    /// Create a new share.
    pub async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (file_id, folder_id, shared_by, shared_with, permission, \
             public_token, expires_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.file_id)
        .bind(data.folder_id)
        .bind(data.shared_by)
        .bind(data.shared_with)
        .bind(data.permission)
        .bind(&data.public_token)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    /// List all shares attached to a file.
    pub async fn find_for_file(&self, file_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE file_id = $1 ORDER BY created_at ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list file shares", e))
    }

    /// Find the user-targeted share of a file for a specific recipient.
    pub async fn find_for_recipient(
        &self,
        file_id: Uuid,
        shared_with: Uuid,
    ) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE file_id = $1 AND shared_with = $2",
        )
        .bind(file_id)
        .bind(shared_with)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find recipient share", e)
        })
    }

    /// Find the public share of a file, if one exists.
    pub async fn find_public_for_file(&self, file_id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE file_id = $1 AND shared_with IS NULL",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find public share", e)
        })
    }

    /// Update the permission of an existing share.
    pub async fn update_permission(
        &self,
        id: Uuid,
        permission: SharePermission,
    ) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "UPDATE shares SET permission = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(permission)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update share permission", e)
        })
    }

    /// Replace the public token (and optionally expiry) of a share.
    pub async fn rotate_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "UPDATE shares SET public_token = $2, expires_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rotate token", e))
    }

    /// Delete a share.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every share attached to a file.
    pub async fn delete_for_file(&self, file_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM shares WHERE file_id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete file shares", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete every share attached to the given files or folders.
    pub async fn delete_for_resources(
        &self,
        file_ids: &[Uuid],
        folder_ids: &[Uuid],
    ) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM shares WHERE file_id = ANY($1) OR folder_id = ANY($2)")
                .bind(file_ids)
                .bind(folder_ids)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete shares", e)
                })?;
        Ok(result.rows_affected())
    }
}
