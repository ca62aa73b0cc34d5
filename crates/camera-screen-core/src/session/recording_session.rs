use crate::format_time;

/// Session state owned by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingSession {
    /// A recording is in progress.
    pub active: bool,
    /// Whole seconds recorded in the current (or last) session.
    pub elapsed_seconds: u64,
}

/// Sink request awaiting its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    /// Start requested, no outcome yet.
    Starting,
    /// Stop requested, no outcome yet.
    Stopping,
}

/// Read-only view published to the UI after every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// A recording is in progress.
    pub active: bool,
    /// Whole seconds recorded.
    pub elapsed_seconds: u64,
    /// Pending sink request, if any.
    pub in_flight: Option<InFlight>,
}

impl SessionSnapshot {
    /// Elapsed time as `MM:SS`.
    pub fn elapsed_display(&self) -> String {
        format_time(self.elapsed_seconds)
    }
}
