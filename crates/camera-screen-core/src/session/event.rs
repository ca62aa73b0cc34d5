use crate::sink::SinkOutcome;

use uuid::Uuid;

/// Everything that can wake the recording controller besides a user action.
///
/// Sink outcomes and ticks share one channel so the controller handles them
/// strictly one at a time, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Outcome reported by the capture sink.
    Sink {
        /// Attempt the outcome belongs to.
        session_id: Uuid,
        /// What happened.
        outcome: SinkOutcome,
    },
    /// One period of the elapsed-time clock passed.
    Tick {
        /// Attempt the tick was scheduled for.
        session_id: Uuid,
    },
}
