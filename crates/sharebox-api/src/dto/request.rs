//! Request body and query DTOs.

use serde::Deserialize;
use uuid::Uuid;

use sharebox_entity::share::SharePermission;

/// Body of `POST /api/auth/sso/callback`.
#[derive(Debug, Clone, Deserialize)]
pub struct SsoCallbackRequest {
    /// Authorization code returned by the identity provider.
    pub code: String,
}

/// Body of `POST /api/folders`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder (omitted = root level).
    pub parent_id: Option<Uuid>,
}

/// Body of `POST /api/files/{id}/shares`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShareRequest {
    /// Recipient user.
    pub user_id: Uuid,
    /// Permission to grant.
    pub permission: SharePermission,
}

/// Query of listing endpoints that take an optional folder.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderQuery {
    /// Folder to operate in (omitted = root level).
    pub folder_id: Option<Uuid>,
}

/// Query of the editor config and callback endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FileQuery {
    /// File the request concerns.
    pub file_id: Uuid,
}

/// Query of the editor download endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadTokenQuery {
    /// Scoped download token issued with the editor config.
    pub token: String,
}
