//! Object store configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object store configuration (MinIO in production).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Endpoint URL (e.g. `http://localhost:9000`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Region; MinIO accepts any value here.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket holding all file objects.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// TTL in seconds for presigned download URLs.
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            bucket: default_bucket(),
            access_key: String::new(),
            secret_key: String::new(),
            presign_ttl_seconds: default_presign_ttl(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "sharebox".to_string()
}

fn default_presign_ttl() -> u64 {
    3600
}
