//! The capture capability consumed by the recording controller.

use crate::{CoreResult, session::SessionEvent};

use std::path::PathBuf;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Options passed to [`CaptureSink::start`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartOptions {
    /// Fire the flash (torch) for the duration of the recording.
    pub flash_enabled: bool,
}

/// Asynchronous outcome reported by a capture sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The sink began capturing.
    Accepted,
    /// Capture ended on its own (storage limit, external stop).
    Finished {
        /// Where the finished recording was written.
        artifact: PathBuf,
    },
    /// Capture ended in response to [`CaptureSink::stop`].
    Stopped {
        /// Where the finished recording was written.
        artifact: PathBuf,
    },
    /// The sink failed to start or failed mid-capture.
    Failed {
        /// Error reported by the sink.
        reason: String,
    },
}

/// Reporting handle given to a sink for one recording attempt.
///
/// Every outcome is tagged with the attempt's session id so the controller
/// can discard reports that arrive after the attempt was torn down.
#[derive(Debug, Clone)]
pub struct SinkEvents {
    session_id: Uuid,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SinkEvents {
    /// Create a reporting handle for `session_id`.
    pub fn new(session_id: Uuid, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { session_id, tx }
    }

    /// Session id of the attempt this handle reports for.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Deliver an outcome. Returns `false` once the controller is gone.
    pub fn report(&self, outcome: SinkOutcome) -> bool {
        self.tx
            .send(SessionEvent::Sink {
                session_id: self.session_id,
                outcome,
            })
            .is_ok()
    }

    /// Report [`SinkOutcome::Accepted`].
    pub fn accepted(&self) -> bool {
        self.report(SinkOutcome::Accepted)
    }

    /// Report [`SinkOutcome::Finished`].
    pub fn finished(&self, artifact: PathBuf) -> bool {
        self.report(SinkOutcome::Finished { artifact })
    }

    /// Report [`SinkOutcome::Stopped`].
    pub fn stopped(&self, artifact: PathBuf) -> bool {
        self.report(SinkOutcome::Stopped { artifact })
    }

    /// Report [`SinkOutcome::Failed`].
    pub fn failed(&self, reason: impl Into<String>) -> bool {
        self.report(SinkOutcome::Failed {
            reason: reason.into(),
        })
    }
}

/// External subsystem that records video to storage.
///
/// Both calls only *request* a transition. The result arrives later through
/// the [`SinkEvents`] handle. A synchronous `Err` from [`CaptureSink::start`]
/// means no capture device is ready.
pub trait CaptureSink {
    /// Request capture to begin.
    fn start(&mut self, options: StartOptions, events: SinkEvents) -> CoreResult<()>;

    /// Request the current capture to end.
    fn stop(&mut self, events: SinkEvents) -> CoreResult<()>;
}
