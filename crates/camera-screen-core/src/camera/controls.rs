/// Which physical camera feeds the preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraPosition {
    /// Rear camera.
    #[default]
    Back,
    /// Selfie camera.
    Front,
}

impl CameraPosition {
    /// The other camera.
    pub fn flipped(self) -> Self {
        match self {
            CameraPosition::Back => CameraPosition::Front,
            CameraPosition::Front => CameraPosition::Back,
        }
    }
}

/// What the shutter button does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureMode {
    /// Shutter takes a photo.
    #[default]
    Photo,
    /// Shutter toggles video recording.
    Video,
}

/// User-facing camera switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraControls {
    /// Flash for photos, torch for video.
    pub flash_enabled: bool,
    /// Active camera.
    pub position: CameraPosition,
    /// Shutter behavior.
    pub mode: CaptureMode,
}

impl CameraControls {
    /// Flip the flash switch and return the new value.
    pub fn toggle_flash(&mut self) -> bool {
        self.flash_enabled = !self.flash_enabled;
        self.flash_enabled
    }

    /// Switch between back and front camera and return the new position.
    pub fn toggle_camera(&mut self) -> CameraPosition {
        self.position = self.position.flipped();
        self.position
    }

    /// Select the shutter mode.
    pub fn set_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
    }
}
