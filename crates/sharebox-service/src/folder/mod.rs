//! Folder tree management.

pub mod service;

pub use service::{FolderListing, FolderService};
