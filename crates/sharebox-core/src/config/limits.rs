//! Upload limits and extension policy.

use serde::{Deserialize, Serialize};

/// Upload validation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum size of a single uploaded file, in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Per-user storage quota, in gigabytes.
    #[serde(default = "default_max_storage_gb")]
    pub max_storage_gb: u64,
    /// Extensions that are always rejected (with leading dot).
    #[serde(default = "default_blocked_extensions")]
    pub blocked_extensions: Vec<String>,
    /// Allow-list of extensions; `["*"]` means everything not blocked.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl LimitsConfig {
    /// Maximum file size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Storage quota in bytes.
    pub fn max_storage_bytes(&self) -> u64 {
        self.max_storage_gb * 1024 * 1024 * 1024
    }

    /// Whether the allow-list is the wildcard.
    pub fn allows_any_extension(&self) -> bool {
        self.allowed_extensions.iter().any(|e| e == "*")
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            max_storage_gb: default_max_storage_gb(),
            blocked_extensions: default_blocked_extensions(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_file_size_mb() -> u64 {
    100
}

fn default_max_storage_gb() -> u64 {
    10
}

fn default_blocked_extensions() -> Vec<String> {
    [".exe", ".bat", ".cmd", ".sh", ".msi", ".dll", ".scr"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["*".to_string()]
}
