use crate::config::default_permission_granted;

use serde::{Deserialize, Serialize};

/// Permissions the simulated OS grants at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Camera and microphone access.
    #[serde(default = "default_permission_granted")]
    pub camera: bool,

    /// Media library access.
    #[serde(default = "default_permission_granted")]
    pub media: bool,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            camera: default_permission_granted(),
            media: default_permission_granted(),
        }
    }
}
