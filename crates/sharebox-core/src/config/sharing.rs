//! Sharing feature switches.

use serde::{Deserialize, Serialize};

/// Sharing policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Whether public (unauthenticated, token-based) links may be created.
    /// Disabling this blocks new link creation but does not revoke tokens
    /// that were already issued.
    #[serde(default = "default_true")]
    pub allow_public: bool,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self { allow_public: true }
    }
}

fn default_true() -> bool {
    true
}
