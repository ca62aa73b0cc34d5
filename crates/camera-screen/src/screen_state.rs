use camera_screen_core::{
    Asset, CameraControls, CameraPosition, CaptureMode, Permissions, PhotoOverlay, SessionSnapshot,
};

use std::path::Path;

/// Which surface fills the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenView {
    /// Camera preview with controls.
    #[default]
    Live,
    /// Photo roll grid, newest first.
    Grid(Vec<Asset>),
}

/// Everything the screen renders besides the recording session.
#[derive(Debug)]
pub struct ScreenState {
    pub(crate) controls: CameraControls,
    pub(crate) permissions: Permissions,
    pub(crate) overlay: PhotoOverlay,
    pub(crate) view: ScreenView,
    pub(crate) gallery_strip: Option<Asset>,
}

impl ScreenState {
    /// Initial state for the given permissions.
    pub fn new(permissions: Permissions) -> Self {
        Self {
            controls: CameraControls::default(),
            permissions,
            overlay: PhotoOverlay::default(),
            view: ScreenView::default(),
            gallery_strip: None,
        }
    }

    /// Render the screen as text.
    pub fn render(&self, session: &SessionSnapshot) -> String {
        if !self.permissions.camera {
            return "Camera permission is required. Type `grant` to allow access.".to_string();
        }

        if let ScreenView::Grid(assets) = &self.view {
            let mut out = format!("Gallery ({} photos, `close` to return)", assets.len());
            for asset in assets {
                out.push_str("\n  ");
                out.push_str(&file_name(&asset.path));
            }
            return out;
        }

        let mut parts = Vec::new();

        if session.active {
            parts.push(format!("[REC {}]", session.elapsed_display()));
        }
        if session.in_flight.is_some() {
            parts.push("[waiting for camera]".to_string());
        }

        parts.push(format!(
            "mode={} flash={} camera={}",
            match self.controls.mode {
                CaptureMode::Photo => "photo",
                CaptureMode::Video => "video",
            },
            if self.controls.flash_enabled { "on" } else { "off" },
            match self.controls.position {
                CameraPosition::Back => "back",
                CameraPosition::Front => "front",
            },
        ));

        match &self.gallery_strip {
            Some(asset) => parts.push(format!("last={}", file_name(&asset.path))),
            None => parts.push("last=-".to_string()),
        }

        if let Some(photo) = self.overlay.visible() {
            parts.push(format!("showing {}", file_name(photo)));
        }

        parts.join(" ")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
