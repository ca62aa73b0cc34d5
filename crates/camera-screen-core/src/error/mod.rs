use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Capture and recording errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No capture device ready. No session starts.
    #[error("Capture sink unavailable: {reason} {location}")]
    SinkUnavailable {
        /// Why the sink could not take the request.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The sink declined to begin capture. The session stays inactive.
    #[error("Recording start rejected: {reason} {location}")]
    StartRejected {
        /// Reason reported by the sink.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Capture failed while a session was active. The session was torn down.
    #[error("Recording failed: {reason} {location}")]
    RecordingFailed {
        /// Reason reported by the sink.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Persisting a finished artifact failed.
    #[error("Failed to save {path:?}: {source} {location}")]
    SaveFailed {
        /// Artifact that could not be saved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A required permission has not been granted.
    #[error("Permission denied: {permission} {location}")]
    PermissionDenied {
        /// Name of the missing permission.
        permission: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Camera controls cannot change while a recording is in progress.
    #[error("Camera controls locked while recording {location}")]
    ControlsLocked {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Asset library could not be read.
    #[error("Asset library error: {reason} {location}")]
    Library {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
