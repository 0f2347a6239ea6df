//! # sharebox-storage
//!
//! S3-compatible object-store gateway and object-key generation.
//!
//! All byte traffic between clients and the object store goes through
//! presigned URLs minted here; the application itself only proxies bytes
//! for uploads and editor saves.

pub mod gateway;
pub mod key;

pub use gateway::StorageGateway;
