use crate::{AppCommand, AppResult, ScreenState, ScreenView, SimulatedCamera, config::Config};

use std::{panic::Location, sync::Arc};

use camera_screen_core::{
    AssetKind, AssetLibrary, CameraControls, CaptureError, CaptureMode, CoreResult,
    FsAssetLibrary, GRID_PAGE_SIZE, Permissions, RecordingController, SessionEvent,
    SessionNotice, TokioClock, ToggleOutcome, take_photo,
};
use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, watch},
    time::Instant,
};
use tracing::{debug, error, info, instrument, warn};

/// Whether the event loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Main application state.
///
/// The single actor of the screen: user commands, camera outcomes, timer
/// ticks, overlay expiry and sink timeouts are all handled here, one at a
/// time.
pub struct App {
    pub(crate) controller: RecordingController<SimulatedCamera, TokioClock>,
    pub(crate) session_events: mpsc::UnboundedReceiver<SessionEvent>,
    pub(crate) camera: SimulatedCamera,
    pub(crate) library: Arc<dyn AssetLibrary>,
    pub(crate) screen: ScreenState,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Build the screen from configuration.
    ///
    /// Must be called inside a tokio runtime.
    #[track_caller]
    #[instrument(skip_all)]
    pub(crate) fn new(
        config: &Config,
        command_rx: mpsc::Receiver<AppCommand>,
        shutdown_tx: watch::Sender<bool>,
    ) -> AppResult<Self> {
        config.ensure_dirs()?;

        let camera = SimulatedCamera::new(&config.camera.capture_dir, config.max_recording())?;
        let library: Arc<dyn AssetLibrary> = Arc::new(FsAssetLibrary::new(&config.library.path));

        let (controller, session_events) = RecordingController::new(
            camera.clone(),
            TokioClock,
            Arc::clone(&library),
            config.controller_settings(),
        );

        let mut app = Self {
            controller,
            session_events,
            camera,
            library,
            screen: ScreenState::new(config.permissions()),
            command_rx,
            shutdown_tx,
        };
        app.refresh_gallery_strip();

        Ok(app)
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Camera screen starting");
        self.render();

        loop {
            let in_flight_deadline = self.controller.in_flight_deadline();
            let overlay_deadline = self.screen.overlay.deadline();

            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    if self.handle_command(command) == Flow::Exit {
                        info!("Shutdown requested");
                        break;
                    }
                }

                Some(event) = self.session_events.recv() => {
                    self.handle_session_event(event);
                }

                _ = tokio::time::sleep_until(in_flight_deadline.unwrap_or_else(Instant::now)),
                    if in_flight_deadline.is_some() =>
                {
                    if let Some(notice) = self.controller.expire_in_flight(Instant::now()) {
                        self.handle_notice(notice);
                    }
                    self.render();
                }

                _ = tokio::time::sleep_until(overlay_deadline.unwrap_or_else(Instant::now)),
                    if overlay_deadline.is_some() =>
                {
                    if self.screen.overlay.dismiss_if_expired(Instant::now()) {
                        self.render();
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.finish_recording_on_exit();

        let _ = self.shutdown_tx.send(true);
        info!("Camera screen shut down successfully");

        Ok(())
    }

    /// Apply one user command and re-render.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&mut self, command: AppCommand) -> Flow {
        let result = match command {
            AppCommand::Shutdown => return Flow::Exit,
            AppCommand::Status => Ok(()),
            AppCommand::GrantPermissions => {
                self.screen.permissions = Permissions {
                    camera: true,
                    media: true,
                };
                info!("Permissions granted");
                self.refresh_gallery_strip();
                Ok(())
            }
            _ if !self.screen.permissions.camera => self.screen.permissions.require_camera(),
            AppCommand::Shutter => match self.screen.controls.mode {
                CaptureMode::Photo => self.capture_photo(),
                CaptureMode::Video => self.toggle_recording(),
            },
            AppCommand::ToggleRecording => self.toggle_recording(),
            AppCommand::PhotoMode => self.change_controls(|c| c.set_mode(CaptureMode::Photo)),
            AppCommand::VideoMode => self.change_controls(|c| c.set_mode(CaptureMode::Video)),
            AppCommand::ToggleFlash => self.change_controls(|c| {
                c.toggle_flash();
            }),
            AppCommand::FlipCamera => self
                .change_controls(|c| {
                    c.toggle_camera();
                })
                .map(|()| self.camera.set_position(self.screen.controls.position)),
            AppCommand::OpenGallery => self.open_gallery(),
            AppCommand::CloseGallery => {
                self.screen.view = ScreenView::Live;
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(&e);
        }

        self.render();
        Flow::Continue
    }

    /// Apply one sink outcome or tick, re-rendering if anything changed.
    pub(crate) fn handle_session_event(&mut self, event: SessionEvent) {
        let before = self.controller.snapshot();

        if let Some(notice) = self.controller.handle_event(event) {
            self.handle_notice(notice);
        }

        if self.controller.snapshot() != before {
            self.render();
        }
    }

    /// Apply every session event already queued.
    pub(crate) fn drain_session_events(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            self.handle_session_event(event);
        }
    }

    fn handle_notice(&mut self, notice: SessionNotice) {
        match notice {
            SessionNotice::Started { session_id } => {
                debug!(session_id = %session_id, "Recording notice: started");
            }
            SessionNotice::Saved { session_id, asset } => {
                info!(session_id = %session_id, asset = ?asset.path, "Video saved");
                println!("Saved video {}", asset.path.display());
            }
            SessionNotice::Failed { session_id, error } => {
                error!(session_id = %session_id, error = ?error, "Recording attempt failed");
                self.report(&error);
            }
        }
    }

    fn toggle_recording(&mut self) -> CoreResult<()> {
        match self
            .controller
            .toggle_recording(self.screen.controls.flash_enabled)?
        {
            ToggleOutcome::StartRequested { session_id } => {
                debug!(session_id = %session_id, "Waiting for camera to start");
            }
            ToggleOutcome::StopRequested { session_id } => {
                debug!(session_id = %session_id, "Waiting for camera to stop");
            }
            ToggleOutcome::Ignored => {
                warn!("Camera is still busy, press again once it answers");
            }
        }
        Ok(())
    }

    fn capture_photo(&mut self) -> CoreResult<()> {
        let asset = take_photo(
            &mut self.camera,
            self.library.as_ref(),
            self.screen.permissions,
            self.screen.controls,
        )?;

        self.screen.overlay.show(asset.path.clone(), Instant::now());
        self.screen.gallery_strip = Some(asset);

        Ok(())
    }

    #[track_caller]
    fn change_controls(&mut self, change: impl FnOnce(&mut CameraControls)) -> CoreResult<()> {
        if self.controller.is_recording() || self.controller.is_busy() {
            return Err(CaptureError::ControlsLocked {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        change(&mut self.screen.controls);
        Ok(())
    }

    fn open_gallery(&mut self) -> CoreResult<()> {
        self.screen.permissions.require_media()?;

        let assets = self.library.recent(AssetKind::Photo, GRID_PAGE_SIZE)?;
        if assets.is_empty() {
            println!("No photos yet");
        } else {
            self.screen.view = ScreenView::Grid(assets);
        }
        Ok(())
    }

    fn refresh_gallery_strip(&mut self) {
        if !self.screen.permissions.media {
            return;
        }

        match self.library.recent(AssetKind::Photo, 1) {
            Ok(assets) => self.screen.gallery_strip = assets.into_iter().next(),
            Err(e) => warn!(error = ?e, "Failed to load gallery strip"),
        }
    }

    /// Stop a running recording so it is saved before exit.
    fn finish_recording_on_exit(&mut self) {
        if !self.controller.is_recording() || self.controller.is_busy() {
            return;
        }

        info!("Stopping active recording before exit");
        if let Err(e) = self.controller.toggle_recording(self.screen.controls.flash_enabled) {
            error!(error = ?e, "Failed to stop recording on exit");
            return;
        }
        self.drain_session_events();
    }

    fn report(&self, error: &CaptureError) {
        warn!(error = ?error, "Action failed");
        println!("! {}", describe(error));
    }

    fn render(&self) {
        println!("{}", self.screen.render(&self.controller.snapshot()));
    }
}

/// Short user-facing description of an error.
pub(crate) fn describe(error: &CaptureError) -> &'static str {
    match error {
        CaptureError::SinkUnavailable { .. } => "Camera not ready",
        CaptureError::StartRejected { .. } => "Camera could not start recording",
        CaptureError::RecordingFailed { .. } => "Recording failed",
        CaptureError::SaveFailed { .. } => "Could not save to the photo roll",
        CaptureError::PermissionDenied { .. } => "Permission required, type `grant`",
        CaptureError::ControlsLocked { .. } => "Not available while recording",
        CaptureError::Library { .. } => "Could not read the photo roll",
    }
}
