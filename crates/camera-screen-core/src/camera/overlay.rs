use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::time::Instant;

/// How long the last captured photo stays on screen.
pub const OVERLAY_DURATION: Duration = Duration::from_secs(3);

/// Thumbnail of the last captured photo, shown briefly after capture.
#[derive(Debug, Default)]
pub struct PhotoOverlay {
    shown: Option<(PathBuf, Instant)>,
}

impl PhotoOverlay {
    /// Show `photo` until [`OVERLAY_DURATION`] after `now`.
    ///
    /// A new photo replaces the current one and restarts the timer.
    pub fn show(&mut self, photo: PathBuf, now: Instant) {
        self.shown = Some((photo, now + OVERLAY_DURATION));
    }

    /// Photo currently on screen.
    pub fn visible(&self) -> Option<&Path> {
        self.shown.as_ref().map(|(path, _)| path.as_path())
    }

    /// When the overlay should be dismissed, if one is shown.
    pub fn deadline(&self) -> Option<Instant> {
        self.shown.as_ref().map(|(_, until)| *until)
    }

    /// Hide the overlay if its time is up. Returns `true` if it was hidden.
    pub fn dismiss_if_expired(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(until) if now >= until => {
                self.shown = None;
                true
            }
            _ => false,
        }
    }
}
