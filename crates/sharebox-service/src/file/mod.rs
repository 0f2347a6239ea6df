//! File upload, download, and metadata management.

pub mod download;
pub mod service;
pub mod upload;

pub use download::DownloadService;
pub use service::FileService;
pub use upload::{UploadPart, UploadService};
