//! Configuration management for camera-screen.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{CameraConfig, LibraryConfig, PermissionsConfig, RecordingConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use camera_screen_core::{ControllerSettings, Permissions};
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Recording timer settings.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Simulated camera settings.
    pub camera: CameraConfig,
    /// Media library settings.
    pub library: LibraryConfig,
    /// Permissions granted at startup.
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config found, creating default");
            let config = Self::defaults_in(Self::project_dirs()?.data_dir());
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from `path`.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Default configuration with capture and library directories under `data_dir`.
    pub fn defaults_in(data_dir: &Path) -> Self {
        Config {
            recording: RecordingConfig::default(),
            camera: CameraConfig {
                capture_dir: data_dir.join("captures"),
                max_recording_secs: crate::config::DEFAULT_MAX_RECORDING_SECS,
            },
            library: LibraryConfig {
                path: data_dir.join("library"),
            },
            permissions: PermissionsConfig::default(),
        }
    }

    /// Reject values the controller cannot run with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if self.recording.tick_interval_ms == 0 {
            return Err(AppError::ConfigError {
                reason: "recording.tick_interval_ms must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    /// Save configuration to `path` using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let location = Location::caller();
        let failed = |step: &str, e: &dyn std::fmt::Display| AppError::ConfigError {
            reason: format!("{} {:?}: {}", step, config_path, e),
            location: ErrorLocation::from(location),
        };

        let contents = toml::to_string_pretty(self).map_err(|e| failed("Failed to serialize", &e))?;

        let temp_path = config_path.with_extension("toml.tmp");
        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| failed("Failed to create temp for", &e))?;
        temp_file
            .write_all(contents.as_bytes())
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| failed("Failed to write temp for", &e))?;

        fs::rename(&temp_path, config_path).map_err(|e| failed("Failed to replace", &e))?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Create the capture and library directories.
    #[track_caller]
    pub fn ensure_dirs(&self) -> AppResult<()> {
        for dir in [&self.camera.capture_dir, &self.library.path] {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
                debug!(dir = ?dir, "Created directory");
            }
        }
        Ok(())
    }

    /// Recording controller settings.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            tick_period: Duration::from_millis(self.recording.tick_interval_ms),
            sink_timeout: match self.recording.sink_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }

    /// Per-recording storage limit of the simulated camera.
    pub fn max_recording(&self) -> Option<Duration> {
        match self.camera.max_recording_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Startup permissions.
    pub fn permissions(&self) -> Permissions {
        Permissions {
            camera: self.permissions.camera,
            media: self.permissions.media,
        }
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "camera-screen", "Camera-Screen").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}
