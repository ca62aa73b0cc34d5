use crate::config::{default_sink_timeout_secs, default_tick_interval_ms};

use serde::{Deserialize, Serialize};

/// Recording timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Elapsed-time tick period in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seconds to wait for the camera to answer a start/stop (0 = forever).
    #[serde(default = "default_sink_timeout_secs")]
    pub sink_timeout_secs: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            sink_timeout_secs: default_sink_timeout_secs(),
        }
    }
}
