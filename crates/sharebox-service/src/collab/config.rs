//! Editor launch configuration.

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use sharebox_auth::jwt::JwtEncoder;
use sharebox_core::config::EditorConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_database::repositories::UserRepository;
use sharebox_entity::share::SharePermission;

use super::doctype::{is_editable, DocumentType};
use crate::context::RequestContext;
use crate::share::AccessService;

/// Builds the signed launch configuration handed to the editor frontend.
#[derive(Clone)]
pub struct EditorConfigService {
    access: Arc<AccessService>,
    user_repo: Arc<UserRepository>,
    encoder: Arc<JwtEncoder>,
    editor: EditorConfig,
    public_url: String,
}

impl std::fmt::Debug for EditorConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorConfigService")
            .field("public_url", &self.public_url)
            .finish()
    }
}

impl EditorConfigService {
    /// Creates a new editor config service.
    pub fn new(
        access: Arc<AccessService>,
        user_repo: Arc<UserRepository>,
        encoder: Arc<JwtEncoder>,
        editor: EditorConfig,
        public_url: String,
    ) -> Self {
        Self {
            access,
            user_repo,
            encoder,
            editor,
            public_url,
        }
    }

    /// Build the launch configuration for one file.
    ///
    /// Edit mode requires an editable format, EDIT-level access, and edit
    /// mode enabled in config; everything else degrades to view mode.
    /// Unsupported formats are rejected before any token is minted.
    pub async fn editor_config(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> AppResult<serde_json::Value> {
        if !self.editor.enabled {
            return Err(AppError::forbidden("Document editing is disabled"));
        }

        let (file, decision) = self
            .access
            .authorize_file(ctx, file_id, SharePermission::View)
            .await?;

        let ext = file
            .extension()
            .map(|e| e.trim_start_matches('.').to_string())
            .ok_or_else(|| AppError::validation("File has no recognizable type"))?;
        let doc_type = DocumentType::from_extension(&ext).ok_or_else(|| {
            AppError::validation(format!("'{ext}' files cannot be opened in the editor"))
        })?;

        let mode = if is_editable(&ext)
            && self.editor.edit_enabled
            && decision.allows(SharePermission::Edit)
        {
            "edit"
        } else {
            "view"
        };

        let download_token = self.encoder.generate_download_token(file.id)?;
        let base = self.public_url.trim_end_matches('/');
        let document_url = format!(
            "{base}/api/editor/download/{}?token={download_token}",
            file.id
        );
        let callback_url = format!("{base}/api/editor/callback?file_id={}", file.id);

        let user_name = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| ctx.email.clone());

        let mut config = json!({
            "documentType": doc_type.as_str(),
            "document": {
                "fileType": ext,
                "key": file.document_key(),
                "title": file.name,
                "url": document_url,
            },
            "editorConfig": {
                "mode": mode,
                "callbackUrl": callback_url,
                "user": {
                    "id": ctx.user_id.to_string(),
                    "name": user_name,
                },
            },
        });

        if !self.editor.secret.is_empty() {
            let token = encode(
                &Header::default(),
                &config,
                &EncodingKey::from_secret(self.editor.secret.as_bytes()),
            )
            .map_err(|e| AppError::internal(format!("Failed to sign editor config: {e}")))?;
            config["token"] = json!(token);
        }

        info!(user_id = %ctx.user_id, file_id = %file.id, mode, "Editor config issued");
        Ok(config)
    }
}
