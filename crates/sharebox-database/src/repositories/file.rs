//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_entity::file::model::{CreateFile, File};

/// Repository for file metadata CRUD and quota queries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Create a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (name, original_name, mime_type, size_bytes, object_key, \
             folder_id, owner_id) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.original_name)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.object_key)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// List files in a folder, sorted by name.
    ///
    /// `folder_id = None` lists the owner's root-level files.
    pub async fn find_in_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC",
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List every file a user owns, regardless of folder.
    pub async fn find_all_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list owned files", e)
            })
    }

    /// Sum of all stored bytes owned by a user, for quota enforcement.
    pub async fn total_size_for_owner(&self, owner_id: Uuid) -> AppResult<i64> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT SUM(size_bytes) FROM files WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to sum storage usage", e)
                })?;
        Ok(total.unwrap_or(0))
    }

    /// Record a successful editor save: new byte length, bumped timestamp.
    ///
    /// The object key never changes; the updated timestamp is what rolls
    /// the document key forward.
    pub async fn record_save(&self, id: Uuid, size_bytes: i64) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET size_bytes = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(size_bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record save", e))
    }

    /// Flip the denormalized public flag.
    pub async fn set_public(&self, id: Uuid, is_public: bool) -> AppResult<bool> {
        let result = sqlx::query("UPDATE files SET is_public = $2 WHERE id = $1")
            .bind(id)
            .bind(is_public)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update public flag", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a single file record.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every file record under the given folders.
    pub async fn delete_by_folder_ids(&self, folder_ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE folder_id = ANY($1)")
            .bind(folder_ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder files", e)
            })?;
        Ok(result.rows_affected())
    }
}
