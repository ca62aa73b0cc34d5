use crate::{
    CaptureError, CoreResult,
    clock::{Clock, TickHandle, TokioClock},
    library::{AssetKind, AssetLibrary},
    session::{InFlight, RecordingSession, SessionEvent, SessionNotice, SessionSnapshot},
    sink::{CaptureSink, SinkEvents, SinkOutcome, StartOptions},
};

use std::{panic::Location, path::PathBuf, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, watch},
    time::Instant,
};
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Default elapsed-time resolution.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Default bound on how long a start or stop request may stay in flight.
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(10);

/// Tuning for [`RecordingController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Period of the elapsed-time tick.
    pub tick_period: Duration,
    /// Give up on an in-flight sink request after this long. `None` waits forever.
    pub sink_timeout: Option<Duration>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            sink_timeout: Some(DEFAULT_SINK_TIMEOUT),
        }
    }
}

/// What a call to [`RecordingController::toggle_recording`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A start request was sent to the sink.
    StartRequested {
        /// Id of the new attempt.
        session_id: Uuid,
    },
    /// A stop request was sent to the sink.
    StopRequested {
        /// Id of the session being stopped.
        session_id: Uuid,
    },
    /// A request was already in flight, so the call did nothing.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    kind: InFlight,
    deadline: Option<Instant>,
}

/// Owns the recording session and its elapsed-time tick.
///
/// The controller is driven by one actor: user toggles go through
/// [`toggle_recording`](Self::toggle_recording), and everything on the
/// returned event receiver goes through [`handle_event`](Self::handle_event).
/// A tick exists exactly while the session is active, and every exit path
/// releases it through the same teardown.
pub struct RecordingController<S, C = TokioClock> {
    sink: S,
    clock: C,
    library: Arc<dyn AssetLibrary>,
    settings: ControllerSettings,
    session: RecordingSession,
    attempt: Option<Uuid>,
    pending: Option<PendingRequest>,
    ticker: Option<TickHandle>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<S: CaptureSink, C: Clock> RecordingController<S, C> {
    /// Create a controller and the receiver its events arrive on.
    ///
    /// The receiver never closes while the controller is alive.
    pub fn new(
        sink: S,
        clock: C,
        library: Arc<dyn AssetLibrary>,
        settings: ControllerSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());

        let controller = Self {
            sink,
            clock,
            library,
            settings,
            session: RecordingSession::default(),
            attempt: None,
            pending: None,
            ticker: None,
            events_tx,
            snapshot_tx,
        };

        (controller, events_rx)
    }

    /// Start recording if idle, stop if recording.
    ///
    /// Ignored while a previous start or stop is still waiting for the sink.
    ///
    /// # Errors
    ///
    /// [`CaptureError::SinkUnavailable`] if the sink cannot take a start
    /// request. [`CaptureError::RecordingFailed`] if the stop call itself
    /// fails, in which case the session has already been torn down.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle_recording(&mut self, flash_enabled: bool) -> CoreResult<ToggleOutcome> {
        if let Some(pending) = self.pending {
            debug!(in_flight = ?pending.kind, "Toggle ignored, sink request in flight");
            return Ok(ToggleOutcome::Ignored);
        }

        if self.session.active {
            self.request_stop()
        } else {
            self.request_start(flash_enabled)
        }
    }

    /// Apply a sink outcome or tick.
    pub fn handle_event(&mut self, event: SessionEvent) -> Option<SessionNotice> {
        match event {
            SessionEvent::Tick { session_id } => {
                self.on_tick(session_id);
                None
            }
            SessionEvent::Sink {
                session_id,
                outcome,
            } => self.on_sink_outcome(session_id, outcome),
        }
    }

    /// When the in-flight request times out, if one is pending.
    pub fn in_flight_deadline(&self) -> Option<Instant> {
        self.pending.and_then(|p| p.deadline)
    }

    /// Abandon the in-flight request if its deadline has passed.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn expire_in_flight(&mut self, now: Instant) -> Option<SessionNotice> {
        let pending = self.pending?;
        match pending.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return None,
        }

        let session_id = self.attempt?;

        match pending.kind {
            InFlight::Starting => {
                warn!(session_id = %session_id, "Start request timed out");

                // The sink may still come up later. Ask it to stand down;
                // anything it reports for this attempt is discarded.
                if let Err(e) = self
                    .sink
                    .stop(SinkEvents::new(session_id, self.events_tx.clone()))
                {
                    debug!(session_id = %session_id, error = ?e, "Best-effort stop after timeout failed");
                }

                self.pending = None;
                self.attempt = None;
                self.publish();

                Some(SessionNotice::Failed {
                    session_id,
                    error: CaptureError::StartRejected {
                        reason: "capture sink did not respond".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                })
            }
            InFlight::Stopping => {
                warn!(session_id = %session_id, "Stop request timed out");
                self.teardown();

                Some(SessionNotice::Failed {
                    session_id,
                    error: CaptureError::RecordingFailed {
                        reason: "capture sink did not confirm stop".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                })
            }
        }
    }

    /// A recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.session.active
    }

    /// Whole seconds recorded in the current (or last) session.
    pub fn elapsed_seconds(&self) -> u64 {
        self.session.elapsed_seconds
    }

    /// Elapsed time as `MM:SS`.
    pub fn elapsed_display(&self) -> String {
        self.snapshot().elapsed_display()
    }

    /// A start or stop request is waiting for the sink.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// A periodic tick is scheduled.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active: self.session.active,
            elapsed_seconds: self.session.elapsed_seconds,
            in_flight: self.pending.map(|p| p.kind),
        }
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The capture sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[track_caller]
    fn request_start(&mut self, flash_enabled: bool) -> CoreResult<ToggleOutcome> {
        let location = Location::caller();
        let session_id = Uuid::new_v4();
        let events = SinkEvents::new(session_id, self.events_tx.clone());

        self.sink
            .start(StartOptions { flash_enabled }, events)
            .map_err(|e| {
                warn!(session_id = %session_id, error = ?e, "Capture sink refused start");
                match e {
                    e @ CaptureError::SinkUnavailable { .. } => e,
                    other => CaptureError::SinkUnavailable {
                        reason: other.to_string(),
                        location: ErrorLocation::from(location),
                    },
                }
            })?;

        self.attempt = Some(session_id);
        self.pending = Some(self.pending_request(InFlight::Starting));
        self.publish();

        debug!(session_id = %session_id, flash_enabled, "Start requested");

        Ok(ToggleOutcome::StartRequested { session_id })
    }

    #[track_caller]
    fn request_stop(&mut self) -> CoreResult<ToggleOutcome> {
        let Some(session_id) = self.attempt else {
            // Active without an attempt id cannot happen; recover to idle.
            error!("Active session has no attempt id");
            self.teardown();
            return Ok(ToggleOutcome::Ignored);
        };

        let events = SinkEvents::new(session_id, self.events_tx.clone());

        if let Err(e) = self.sink.stop(events) {
            error!(session_id = %session_id, error = ?e, "Stop call failed");
            self.teardown();
            return Err(CaptureError::RecordingFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.pending = Some(self.pending_request(InFlight::Stopping));
        self.publish();

        debug!(session_id = %session_id, "Stop requested");

        Ok(ToggleOutcome::StopRequested { session_id })
    }

    #[track_caller]
    fn on_sink_outcome(&mut self, session_id: Uuid, outcome: SinkOutcome) -> Option<SessionNotice> {
        if self.attempt != Some(session_id) {
            debug!(session_id = %session_id, outcome = ?outcome, "Discarding stale sink outcome");
            return None;
        }

        let in_flight = self.pending.map(|p| p.kind);

        match outcome {
            SinkOutcome::Accepted => {
                if in_flight != Some(InFlight::Starting) {
                    warn!(session_id = %session_id, in_flight = ?in_flight, "Unexpected accept from sink");
                    return None;
                }
                self.pending = None;
                self.activate(session_id);
                Some(SessionNotice::Started { session_id })
            }
            SinkOutcome::Failed { reason } if in_flight == Some(InFlight::Starting) => {
                warn!(session_id = %session_id, reason = %reason, "Sink rejected start");
                self.pending = None;
                self.attempt = None;
                self.publish();

                Some(SessionNotice::Failed {
                    session_id,
                    error: CaptureError::StartRejected {
                        reason,
                        location: ErrorLocation::from(Location::caller()),
                    },
                })
            }
            SinkOutcome::Failed { reason } => {
                error!(session_id = %session_id, reason = %reason, "Recording failed");
                self.teardown();

                Some(SessionNotice::Failed {
                    session_id,
                    error: CaptureError::RecordingFailed {
                        reason,
                        location: ErrorLocation::from(Location::caller()),
                    },
                })
            }
            SinkOutcome::Finished { artifact } | SinkOutcome::Stopped { artifact } => {
                let elapsed = self.session.elapsed_seconds;
                self.teardown();
                info!(session_id = %session_id, elapsed_seconds = elapsed, "Recording finished");
                Some(self.persist(session_id, artifact))
            }
        }
    }

    fn on_tick(&mut self, session_id: Uuid) {
        if !self.session.active || self.ticker.is_none() || self.attempt != Some(session_id) {
            trace!(session_id = %session_id, "Late tick ignored");
            return;
        }

        self.session.elapsed_seconds = self.session.elapsed_seconds.saturating_add(1);
        self.publish();

        trace!(
            session_id = %session_id,
            elapsed_seconds = self.session.elapsed_seconds,
            "Tick"
        );
    }

    fn activate(&mut self, session_id: Uuid) {
        if let Some(stale) = self.ticker.take() {
            warn!("Replacing a tick that outlived its session");
            stale.cancel();
        }

        self.session.active = true;
        self.session.elapsed_seconds = 0;

        let tx = self.events_tx.clone();
        self.ticker = Some(self.clock.every(
            self.settings.tick_period,
            Box::new(move || tx.send(SessionEvent::Tick { session_id }).is_ok()),
        ));

        self.publish();

        info!(session_id = %session_id, "Recording started");
    }

    /// Single exit path for every way a session ends.
    fn teardown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.session.active = false;
        self.pending = None;
        self.attempt = None;
        self.publish();
    }

    fn persist(&self, session_id: Uuid, artifact: PathBuf) -> SessionNotice {
        match self.library.save_asset(&artifact, AssetKind::Video) {
            Ok(asset) => SessionNotice::Saved { session_id, asset },
            Err(error) => {
                error!(session_id = %session_id, error = ?error, "Failed to save recording");
                SessionNotice::Failed { session_id, error }
            }
        }
    }

    fn pending_request(&self, kind: InFlight) -> PendingRequest {
        PendingRequest {
            kind,
            deadline: self.settings.sink_timeout.map(|t| Instant::now() + t),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
