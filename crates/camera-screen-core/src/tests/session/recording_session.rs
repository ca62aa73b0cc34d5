use crate::{InFlight, RecordingSession, SessionSnapshot};

/// WHAT: A new session starts inactive with zero elapsed time
/// WHY: The screen mounts with nothing recording
#[test]
fn given_new_session_when_created_then_inactive_at_zero() {
    // Given/When: A default session
    let session = RecordingSession::default();

    // Then: Inactive with nothing elapsed
    assert!(!session.active);
    assert_eq!(session.elapsed_seconds, 0);
}

/// WHAT: Snapshot renders elapsed time for display
/// WHY: The UI shows MM:SS while recording
#[test]
fn given_snapshot_when_displaying_elapsed_then_formatted_as_minutes_and_seconds() {
    // Given: A snapshot 125 seconds into a stop request
    let snapshot = SessionSnapshot {
        active: true,
        elapsed_seconds: 125,
        in_flight: Some(InFlight::Stopping),
    };

    // When/Then: Display reads 02:05
    assert_eq!(snapshot.elapsed_display(), "02:05");
}
