//! External document editor configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external collaborative document editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Whether document editing is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the document editing server.
    #[serde(default)]
    pub server_url: String,
    /// Shared secret used to sign launch configs and verify callback
    /// tokens. Callbacks are verified against it unconditionally.
    #[serde(default)]
    pub secret: String,
    /// Whether edit mode (as opposed to view-only) is offered.
    #[serde(default = "default_true")]
    pub edit_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: String::new(),
            secret: String::new(),
            edit_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}
