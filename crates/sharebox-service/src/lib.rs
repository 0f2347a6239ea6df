//! # sharebox-service
//!
//! Business logic service layer for Sharebox. Each service orchestrates
//! repositories, the object-store gateway, and authentication to
//! implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod collab;
pub mod context;
pub mod file;
pub mod folder;
pub mod share;
pub mod user;

pub use collab::{CallbackService, CallbackStatus, EditorConfigService};
pub use context::RequestContext;
pub use file::{DownloadService, FileService, UploadService};
pub use folder::FolderService;
pub use share::{AccessDecision, AccessService, LinkService, ShareService};
pub use user::UserService;
