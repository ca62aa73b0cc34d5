//! Stand-in for the device camera.
//!
//! Writes placeholder files instead of encoding real media and answers the
//! recording controller through the same [`SinkEvents`] channel a native
//! camera module would use.

use crate::AppResult;

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use camera_screen_core::{
    CameraPosition, CaptureError, CaptureSink, CoreResult, PhotoOptions, PhotoSink, SinkEvents,
    StartOptions,
};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug)]
struct ActiveRecording {
    session_id: Uuid,
    path: PathBuf,
    flash_enabled: bool,
    position: CameraPosition,
    started_at: Instant,
}

#[derive(Debug)]
struct CameraState {
    ready: bool,
    position: CameraPosition,
    recording: Option<ActiveRecording>,
}

impl CameraState {
    /// Take the active recording if it belongs to `session_id`.
    fn take_recording(&mut self, session_id: Uuid) -> Option<ActiveRecording> {
        let owned = self
            .recording
            .as_ref()
            .is_some_and(|r| r.session_id == session_id);
        if owned { self.recording.take() } else { None }
    }
}

/// Simulated camera implementing both capture traits.
///
/// Clones share one device, so the recording controller and the photo path
/// can each own a handle.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    state: Arc<Mutex<CameraState>>,
    capture_dir: PathBuf,
    max_recording: Option<Duration>,
}

impl SimulatedCamera {
    /// Create a camera writing into `capture_dir`.
    ///
    /// `max_recording` simulates a storage limit: a recording that reaches
    /// it finishes on its own.
    #[track_caller]
    #[instrument]
    pub fn new(capture_dir: &Path, max_recording: Option<Duration>) -> AppResult<Self> {
        fs::create_dir_all(capture_dir)?;

        info!(capture_dir = ?capture_dir, "SimulatedCamera initialized");

        Ok(Self {
            state: Arc::new(Mutex::new(CameraState {
                ready: true,
                position: CameraPosition::Back,
                recording: None,
            })),
            capture_dir: capture_dir.to_path_buf(),
            max_recording,
        })
    }

    /// Point the camera at the back or front lens.
    pub fn set_position(&self, position: CameraPosition) {
        self.lock().position = position;
        debug!(position = ?position, "Camera switched");
    }

    /// Mark the device ready or unavailable.
    #[cfg(test)]
    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    /// A recording is being captured.
    #[cfg(test)]
    pub fn is_capturing(&self) -> bool {
        self.lock().recording.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, CameraState> {
        // A poisoned lock still holds consistent state; keep using it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[track_caller]
    fn not_ready() -> CaptureError {
        CaptureError::SinkUnavailable {
            reason: "camera not ready".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    fn spawn_storage_limit(&self, limit: Duration, events: SinkEvents) {
        let camera = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;

            let recording = camera.lock().take_recording(events.session_id());

            if let Some(recording) = recording {
                info!(session_id = %recording.session_id, "Storage limit reached");
                match write_recording(&recording) {
                    Ok(path) => events.finished(path),
                    Err(e) => events.failed(format!("failed to write recording: {}", e)),
                };
            }
        });
    }
}

fn write_recording(recording: &ActiveRecording) -> std::io::Result<PathBuf> {
    let contents = format!(
        "simulated {:?} camera recording\nflash={}\nduration_ms={}\n",
        recording.position,
        recording.flash_enabled,
        recording.started_at.elapsed().as_millis()
    );
    fs::write(&recording.path, contents)?;
    Ok(recording.path.clone())
}

impl CaptureSink for SimulatedCamera {
    #[instrument(skip(self, events))]
    fn start(&mut self, options: StartOptions, events: SinkEvents) -> CoreResult<()> {
        let session_id = events.session_id();

        {
            let mut state = self.lock();
            if !state.ready {
                return Err(Self::not_ready());
            }

            if state.recording.is_some() {
                warn!(session_id = %session_id, "Start while already recording");
                events.failed("camera is already recording");
                return Ok(());
            }

            let position = state.position;
            state.recording = Some(ActiveRecording {
                session_id,
                path: self.capture_dir.join(format!("VID_{}.mp4", session_id)),
                flash_enabled: options.flash_enabled,
                position,
                started_at: Instant::now(),
            });
        }

        events.accepted();

        if let Some(limit) = self.max_recording {
            self.spawn_storage_limit(limit, events);
        }

        Ok(())
    }

    #[instrument(skip(self, events))]
    fn stop(&mut self, events: SinkEvents) -> CoreResult<()> {
        let recording = self.lock().take_recording(events.session_id());

        match recording {
            Some(recording) => match write_recording(&recording) {
                Ok(path) => events.stopped(path),
                Err(e) => events.failed(format!("failed to write recording: {}", e)),
            },
            None => events.failed("no recording in progress"),
        };

        Ok(())
    }
}

impl PhotoSink for SimulatedCamera {
    #[instrument(skip(self))]
    fn take_photo(&mut self, options: PhotoOptions) -> CoreResult<PathBuf> {
        let position = {
            let state = self.lock();
            if !state.ready {
                return Err(Self::not_ready());
            }
            state.position
        };

        let path = self.capture_dir.join(format!("IMG_{}.jpg", Uuid::new_v4()));
        let contents = format!(
            "simulated {:?} camera photo\nflash={}\nshutter_sound={}\n",
            position, options.flash_enabled, options.shutter_sound
        );

        fs::write(&path, contents).map_err(|e| CaptureError::SinkUnavailable {
            reason: format!("failed to write photo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(path)
    }
}
