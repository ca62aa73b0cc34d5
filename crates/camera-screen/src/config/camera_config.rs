use crate::config::default_max_recording_secs;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simulated camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Where raw captures are written before they are saved to the library.
    pub capture_dir: PathBuf,

    /// Storage limit per recording in seconds (0 = unlimited).
    #[serde(default = "default_max_recording_secs")]
    pub max_recording_secs: u64,
}
