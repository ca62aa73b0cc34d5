use crate::{CaptureError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Permissions granted by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    /// Camera (and microphone) access. Without it no preview is shown.
    pub camera: bool,
    /// Read/write access to the media library.
    pub media: bool,
}

impl Permissions {
    /// Fail with [`CaptureError::PermissionDenied`] unless camera access is granted.
    #[track_caller]
    pub fn require_camera(&self) -> CoreResult<()> {
        if self.camera {
            Ok(())
        } else {
            Err(CaptureError::PermissionDenied {
                permission: "camera",
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    /// Fail with [`CaptureError::PermissionDenied`] unless media access is granted.
    #[track_caller]
    pub fn require_media(&self) -> CoreResult<()> {
        if self.media {
            Ok(())
        } else {
            Err(CaptureError::PermissionDenied {
                permission: "media",
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
