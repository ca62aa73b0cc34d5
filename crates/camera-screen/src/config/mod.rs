mod camera_config;
#[allow(clippy::module_inception)]
mod config;
mod library_config;
mod permissions_config;
mod recording_config;

pub(crate) use {
    camera_config::CameraConfig, config::Config, library_config::LibraryConfig,
    permissions_config::PermissionsConfig, recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_SINK_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_MAX_RECORDING_SECS: u64 = 0;
pub(crate) const DEFAULT_PERMISSION_GRANTED: bool = true;

pub(crate) fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

pub(crate) fn default_sink_timeout_secs() -> u64 {
    DEFAULT_SINK_TIMEOUT_SECS
}

pub(crate) fn default_max_recording_secs() -> u64 {
    DEFAULT_MAX_RECORDING_SECS
}

pub(crate) fn default_permission_granted() -> bool {
    DEFAULT_PERMISSION_GRANTED
}
