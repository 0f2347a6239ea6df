//! Editor callback state machine.
//!
//! The editing server reports document lifecycle transitions here. Each
//! callback carries a JWT signed with the shared editor secret; nothing
//! is mutated until that signature checks out. Saves overwrite the
//! file's existing object key, so the key stays stable across edits and
//! concurrent saves resolve last-writer-wins.

use std::sync::Arc;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use sharebox_core::config::EditorConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::FileRepository;
use sharebox_storage::StorageGateway;

/// Callback status codes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    /// A user is editing; no document to persist yet.
    Editing,
    /// All editors left and a final version is ready to fetch.
    ReadyForSave,
    /// The editing server failed to save.
    SaveError,
    /// The document was closed without changes.
    ClosedNoChanges,
    /// A save is being assembled; a later callback will deliver it.
    SaveInProgress,
    /// A forced save was requested while editing continues.
    ForceSave,
}

impl CallbackStatus {
    /// Decode a wire integer.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Editing),
            2 => Some(Self::ReadyForSave),
            3 => Some(Self::SaveError),
            4 => Some(Self::ClosedNoChanges),
            6 => Some(Self::SaveInProgress),
            7 => Some(Self::ForceSave),
            _ => None,
        }
    }

    /// Whether this status delivers an edited document to persist.
    pub fn delivers_document(&self) -> bool {
        matches!(self, Self::ReadyForSave | Self::ForceSave)
    }
}

/// Callback request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackPayload {
    /// Wire status code.
    pub status: i32,
    /// Where to fetch the edited document (save statuses only).
    pub url: Option<String>,
    /// Document key the editor was opened with.
    pub key: Option<String>,
    /// JWT signed with the editor secret.
    pub token: Option<String>,
}

/// Handles editor lifecycle callbacks.
#[derive(Clone)]
pub struct CallbackService {
    file_repo: Arc<FileRepository>,
    storage: Arc<StorageGateway>,
    http: reqwest::Client,
    editor: EditorConfig,
}

impl std::fmt::Debug for CallbackService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackService").finish()
    }
}

impl CallbackService {
    /// Creates a new callback service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        storage: Arc<StorageGateway>,
        editor: EditorConfig,
    ) -> Self {
        Self {
            file_repo,
            storage,
            http: reqwest::Client::new(),
            editor,
        }
    }

    /// Process one callback for one file.
    ///
    /// Any error here is translated by the HTTP layer into the fixed
    /// `{"error":1}` response; success always answers `{"error":0}`.
    pub async fn handle_callback(
        &self,
        file_id: Uuid,
        payload: &CallbackPayload,
        bearer_token: Option<&str>,
    ) -> AppResult<()> {
        if !self.editor.enabled {
            return Err(AppError::forbidden("Document editing is disabled"));
        }

        // Signature first; an unverified callback must not cause any
        // state transition.
        let token = payload
            .token
            .as_deref()
            .or(bearer_token)
            .ok_or_else(|| AppError::unauthorized("Callback token missing"))?;
        verify_callback_token(token, &self.editor.secret)?;

        let status = CallbackStatus::from_code(payload.status)
            .ok_or_else(|| AppError::validation(format!("Unknown status {}", payload.status)))?;

        match status {
            CallbackStatus::Editing
            | CallbackStatus::ClosedNoChanges
            | CallbackStatus::SaveInProgress => Ok(()),
            CallbackStatus::SaveError => {
                error!(file_id = %file_id, "Editing server reported a save failure");
                Ok(())
            }
            CallbackStatus::ReadyForSave | CallbackStatus::ForceSave => {
                self.persist_document(file_id, payload).await
            }
        }
    }

    /// Fetch the edited bytes and overwrite the stored object.
    async fn persist_document(&self, file_id: Uuid, payload: &CallbackPayload) -> AppResult<()> {
        let url = payload
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation("Save callback carries no document URL"))?;

        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let response = self.http.get(url).send().await.map_err(|e| {
            AppError::with_source(
                sharebox_core::error::ErrorKind::ExternalService,
                "Failed to fetch edited document",
                e,
            )
        })?;
        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Editing server returned {} for the saved document",
                response.status()
            )));
        }
        let bytes = response.bytes().await.map_err(|e| {
            AppError::with_source(
                sharebox_core::error::ErrorKind::ExternalService,
                "Failed to read edited document body",
                e,
            )
        })?;

        let size = bytes.len() as i64;
        self.storage
            .put_object(&file.object_key, bytes, &file.mime_type)
            .await?;

        if self.file_repo.record_save(file.id, size).await?.is_none() {
            warn!(file_id = %file.id, "File row vanished during save");
        }

        info!(file_id = %file.id, size_bytes = size, "Edited document persisted");
        Ok(())
    }
}

/// Verify a callback JWT against the editor secret.
fn verify_callback_token(token: &str, secret: &str) -> AppResult<()> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();

    decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::unauthorized("Invalid callback signature"))?;
    Ok(())
}
