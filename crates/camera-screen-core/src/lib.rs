//! Camera Screen Core Library
//!
//! Recording-session lifecycle, camera switches and the media library behind
//! a camera screen. Capture hardware, the clock and storage are reached
//! through the [`CaptureSink`], [`PhotoSink`], [`Clock`] and [`AssetLibrary`]
//! traits.
//!
//! # Example
//!
//! ```no_run
//! use camera_screen_core::{
//!     CaptureSink, ControllerSettings, CoreResult, FsAssetLibrary, RecordingController,
//!     SinkEvents, StartOptions, TokioClock,
//! };
//!
//! use std::sync::Arc;
//!
//! struct Recorder;
//!
//! impl CaptureSink for Recorder {
//!     fn start(&mut self, _options: StartOptions, events: SinkEvents) -> CoreResult<()> {
//!         events.accepted();
//!         Ok(())
//!     }
//!
//!     fn stop(&mut self, events: SinkEvents) -> CoreResult<()> {
//!         events.stopped("/tmp/clip.mp4".into());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let library = Arc::new(FsAssetLibrary::new("/tmp/library"));
//!     let (mut controller, mut events) = RecordingController::new(
//!         Recorder,
//!         TokioClock,
//!         library,
//!         ControllerSettings::default(),
//!     );
//!
//!     controller.toggle_recording(false)?;
//!     while let Some(event) = events.recv().await {
//!         if let Some(notice) = controller.handle_event(event) {
//!             println!("{:?} {}", notice, controller.elapsed_display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod clock;
mod error;
mod format;
pub mod library;
pub mod session;
pub mod sink;

pub use {
    camera::{
        CameraControls, CameraPosition, CaptureMode, OVERLAY_DURATION, PhotoOptions, PhotoOverlay,
        PhotoSink, Permissions, take_photo,
    },
    clock::{Clock, TickHandle, TokioClock},
    error::{CaptureError, Result as CoreResult},
    format::format_time,
    library::{Asset, AssetKind, AssetLibrary, FsAssetLibrary, GRID_PAGE_SIZE},
    session::{
        ControllerSettings, InFlight, RecordingController, RecordingSession, SessionEvent,
        SessionNotice, SessionSnapshot, ToggleOutcome,
    },
    sink::{CaptureSink, SinkEvents, SinkOutcome, StartOptions},
};
