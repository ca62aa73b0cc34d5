use crate::{
    CaptureError, ControllerSettings, FsAssetLibrary, RecordingController, SessionEvent,
    SessionNotice, TokioClock, ToggleOutcome,
    tests::support::{FakeSink, drain, next_event, stays_quiet},
};

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tempfile::TempDir;
use tokio::{sync::mpsc, time::Instant};

type Controller = RecordingController<FakeSink, TokioClock>;

fn controller_with(
    sink: FakeSink,
    dir: &TempDir,
    settings: ControllerSettings,
) -> (Controller, mpsc::UnboundedReceiver<SessionEvent>) {
    let library = Arc::new(FsAssetLibrary::new(dir.path().join("library")));
    RecordingController::new(sink, TokioClock, library, settings)
}

fn controller(sink: FakeSink, dir: &TempDir) -> (Controller, mpsc::UnboundedReceiver<SessionEvent>) {
    controller_with(sink, dir, ControllerSettings::default())
}

#[allow(clippy::unwrap_used)]
fn artifact(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"video").unwrap();
    path
}

/// Toggle on and have the sink accept.
#[allow(clippy::unwrap_used)]
fn start_recording(
    controller: &mut Controller,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    sink: &FakeSink,
) {
    controller.toggle_recording(false).unwrap();
    sink.last_start().accepted();
    let notices = drain(controller, events);
    assert!(matches!(notices.as_slice(), [SessionNotice::Started { .. }]));
}

/// Wait for `count` ticks and apply them.
async fn apply_ticks(
    controller: &mut Controller,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    count: usize,
) {
    for _ in 0..count {
        let event = next_event(events).await;
        assert!(matches!(event, SessionEvent::Tick { .. }));
        assert!(controller.handle_event(event).is_none());
    }
}

/// WHAT: Accepted start activates the session with a fresh timer
/// WHY: The timer display must start from 00:00 only once the sink records
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_idle_when_sink_accepts_then_active_with_zero_elapsed_and_tick_scheduled() {
    // Given: An idle controller
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);

    // When: Toggling and the sink accepting
    let outcome = controller.toggle_recording(false).unwrap();
    assert!(matches!(outcome, ToggleOutcome::StartRequested { .. }));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());

    sink.last_start().accepted();
    let notices = drain(&mut controller, &mut events);

    // Then: Active, elapsed reset, exactly one tick scheduled
    assert!(matches!(notices.as_slice(), [SessionNotice::Started { .. }]));
    assert!(controller.is_recording());
    assert!(!controller.is_busy());
    assert!(controller.has_ticker());
    assert_eq!(controller.elapsed_seconds(), 0);
    assert_eq!(controller.elapsed_display(), "00:00");
}

/// WHAT: External finish after three ticks deactivates and freezes the timer
/// WHY: A recording ended by the sink must not leave a tick running
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_three_ticks_when_sink_finishes_normally_then_inactive_and_elapsed_stays_three() {
    // Given: A recording that has run for three seconds
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);
    apply_ticks(&mut controller, &mut events, 3).await;
    assert_eq!(controller.elapsed_seconds(), 3);

    // When: The sink reports it finished on its own
    sink.last_start().finished(artifact(dir.path(), "clip-1.mp4"));
    let notices = drain(&mut controller, &mut events);

    // Then: Saved, inactive, timer cancelled, value frozen at 3
    assert!(matches!(notices.as_slice(), [SessionNotice::Saved { .. }]));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
    assert!(stays_quiet(&mut events, Duration::from_secs(5)).await);
    assert_eq!(controller.elapsed_seconds(), 3);
    assert_eq!(controller.elapsed_display(), "00:03");
}

/// WHAT: Immediate sink failure leaves the session inactive
/// WHY: A rejected start must never schedule a tick
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_start_requested_when_sink_fails_immediately_then_start_rejected_without_tick() {
    // Given: A start request in flight
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    controller.toggle_recording(false).unwrap();

    // When: The sink fails before accepting
    sink.last_start().failed("encoder busy");
    let notices = drain(&mut controller, &mut events);

    // Then: StartRejected, inactive, zero elapsed, nothing scheduled
    assert!(matches!(
        notices.as_slice(),
        [SessionNotice::Failed {
            error: CaptureError::StartRejected { .. },
            ..
        }]
    ));
    assert!(!controller.is_recording());
    assert!(!controller.is_busy());
    assert!(!controller.has_ticker());
    assert_eq!(controller.elapsed_seconds(), 0);
    assert!(stays_quiet(&mut events, Duration::from_secs(3)).await);
}

/// WHAT: Stopping cancels the timer and a later start resets elapsed time
/// WHY: Each session counts from zero
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_one_tick_when_stopped_then_tick_cancelled_and_next_start_resets_elapsed() {
    // Given: A recording one second in
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);
    apply_ticks(&mut controller, &mut events, 1).await;
    assert_eq!(controller.elapsed_seconds(), 1);

    // When: Toggling to stop and the sink confirming
    let outcome = controller.toggle_recording(false).unwrap();
    assert!(matches!(outcome, ToggleOutcome::StopRequested { .. }));
    assert!(controller.is_recording());

    sink.last_stop().stopped(artifact(dir.path(), "clip-2.mp4"));
    let notices = drain(&mut controller, &mut events);

    // Then: Inactive with no tick
    assert!(matches!(notices.as_slice(), [SessionNotice::Saved { .. }]));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
    assert!(stays_quiet(&mut events, Duration::from_secs(3)).await);

    // And: The next session starts from zero
    start_recording(&mut controller, &mut events, &sink);
    assert_eq!(controller.elapsed_seconds(), 0);
    apply_ticks(&mut controller, &mut events, 1).await;
    assert_eq!(controller.elapsed_seconds(), 1);
}

/// WHAT: Toggling during an in-flight start does nothing
/// WHY: Prevents double-start races
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_start_in_flight_when_toggling_again_then_call_ignored() {
    // Given: A start request waiting on the sink
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, _events) = controller(sink.clone(), &dir);
    controller.toggle_recording(false).unwrap();

    // When: Toggling again before the outcome
    let outcome = controller.toggle_recording(false).unwrap();

    // Then: Ignored, the sink saw exactly one start and no stop
    assert_eq!(outcome, ToggleOutcome::Ignored);
    assert_eq!(sink.start_count(), 1);
    assert_eq!(sink.stop_count(), 0);
    assert!(controller.is_busy());
}

/// WHAT: Toggling during an in-flight stop does nothing
/// WHY: Prevents double-stop races
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_stop_in_flight_when_toggling_again_then_call_ignored() {
    // Given: An active recording with a stop request pending
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);
    controller.toggle_recording(false).unwrap();

    // When: Toggling again before the stop settles
    let outcome = controller.toggle_recording(false).unwrap();

    // Then: Ignored, one stop, still active until the sink answers
    assert_eq!(outcome, ToggleOutcome::Ignored);
    assert_eq!(sink.stop_count(), 1);
    assert_eq!(sink.start_count(), 1);
    assert!(controller.is_recording());
}

/// WHAT: A sink with no device refuses to start
/// WHY: No session may begin without a capture device
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_unavailable_sink_when_toggling_then_sink_unavailable_and_no_session() {
    // Given: A sink with no device
    let dir = TempDir::new().unwrap();
    let (mut controller, mut events) = controller(FakeSink::unavailable(), &dir);

    // When: Toggling
    let result = controller.toggle_recording(false);

    // Then: SinkUnavailable, nothing pending, nothing scheduled
    assert!(matches!(result, Err(CaptureError::SinkUnavailable { .. })));
    assert!(!controller.is_recording());
    assert!(!controller.is_busy());
    assert!(!controller.has_ticker());
    assert!(stays_quiet(&mut events, Duration::from_secs(2)).await);
}

/// WHAT: Failure mid-recording tears the session down
/// WHY: A failed recording is not resumed and its tick must stop
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_active_recording_when_sink_fails_then_recording_failed_and_tick_cancelled() {
    // Given: A recording two seconds in
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);
    apply_ticks(&mut controller, &mut events, 2).await;

    // When: The sink reports an error
    sink.last_start().failed("storage full");
    let notices = drain(&mut controller, &mut events);

    // Then: RecordingFailed, inactive, no further ticks
    assert!(matches!(
        notices.as_slice(),
        [SessionNotice::Failed {
            error: CaptureError::RecordingFailed { .. },
            ..
        }]
    ));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
    assert!(stays_quiet(&mut events, Duration::from_secs(5)).await);
    assert_eq!(controller.elapsed_seconds(), 2);
}

/// WHAT: A tick delivered after teardown has no effect
/// WHY: Stop must win over a tick that was already queued
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_tick_queued_before_stop_when_applied_after_teardown_then_ignored() {
    // Given: A recording with a tick received but not yet applied
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);
    let late_tick = next_event(&mut events).await;
    assert!(matches!(late_tick, SessionEvent::Tick { .. }));

    // When: The session stops before the tick is applied
    controller.toggle_recording(false).unwrap();
    sink.last_stop().stopped(artifact(dir.path(), "clip-3.mp4"));
    drain(&mut controller, &mut events);
    assert!(!controller.is_recording());

    let notice = controller.handle_event(late_tick);

    // Then: Nothing changes
    assert!(notice.is_none());
    assert_eq!(controller.elapsed_seconds(), 0);
    assert!(!controller.has_ticker());
}

/// WHAT: A save failure still ends the session
/// WHY: Persisting the artifact must not resurrect the recording
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_missing_artifact_when_finished_then_save_failed_and_session_stays_inactive() {
    // Given: An active recording
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);

    // When: The sink finishes with an artifact that does not exist
    sink.last_start().finished(dir.path().join("never-written.mp4"));
    let notices = drain(&mut controller, &mut events);

    // Then: SaveFailed is reported and the session is over
    assert!(matches!(
        notices.as_slice(),
        [SessionNotice::Failed {
            error: CaptureError::SaveFailed { .. },
            ..
        }]
    ));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
    assert!(!controller.is_busy());
}

/// WHAT: A failing stop call still tears the session down
/// WHY: Stop ends the session regardless of the sink's answer
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_failing_stop_call_when_toggling_then_recording_failed_and_inactive() {
    // Given: An active recording on a sink whose stop call errors
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::failing_stop_call();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    start_recording(&mut controller, &mut events, &sink);

    // When: Toggling to stop
    let result = controller.toggle_recording(false);

    // Then: RecordingFailed and the session is torn down
    assert!(matches!(result, Err(CaptureError::RecordingFailed { .. })));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
    assert!(stays_quiet(&mut events, Duration::from_secs(3)).await);
}

/// WHAT: A start that never settles times out as rejected
/// WHY: A hung sink must not leave the screen stuck in a pending state
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_start_timeout_when_deadline_passes_then_start_rejected_and_late_accept_discarded() {
    // Given: A two-second sink timeout and a start request
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let settings = ControllerSettings {
        sink_timeout: Some(Duration::from_secs(2)),
        ..ControllerSettings::default()
    };
    let (mut controller, mut events) = controller_with(sink.clone(), &dir, settings);
    controller.toggle_recording(false).unwrap();
    assert!(controller.in_flight_deadline().is_some());
    assert!(controller.expire_in_flight(Instant::now()).is_none());

    // When: The deadline passes
    tokio::time::advance(Duration::from_secs(2)).await;
    let notice = controller.expire_in_flight(Instant::now());

    // Then: StartRejected and the sink is asked to stand down
    assert!(matches!(
        notice,
        Some(SessionNotice::Failed {
            error: CaptureError::StartRejected { .. },
            ..
        })
    ));
    assert!(!controller.is_busy());
    assert_eq!(sink.stop_count(), 1);

    // And: A late accept for the abandoned attempt is ignored
    sink.last_start().accepted();
    assert!(drain(&mut controller, &mut events).is_empty());
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
}

/// WHAT: A stop that never settles times out and tears down
/// WHY: The session must end even if the sink never confirms
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_stop_timeout_when_deadline_passes_then_recording_failed_and_inactive() {
    // Given: An active recording with a stop pending and a one-second timeout
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let settings = ControllerSettings {
        sink_timeout: Some(Duration::from_secs(1)),
        ..ControllerSettings::default()
    };
    let (mut controller, mut events) = controller_with(sink.clone(), &dir, settings);
    start_recording(&mut controller, &mut events, &sink);
    controller.toggle_recording(false).unwrap();

    // When: The deadline passes without a stop outcome
    tokio::time::advance(Duration::from_secs(1)).await;
    let notice = controller.expire_in_flight(Instant::now());

    // Then: RecordingFailed, inactive, no tick
    assert!(matches!(
        notice,
        Some(SessionNotice::Failed {
            error: CaptureError::RecordingFailed { .. },
            ..
        })
    ));
    assert!(!controller.is_recording());
    assert!(!controller.has_ticker());
}

/// WHAT: Without a timeout nothing ever expires
/// WHY: `sink_timeout: None` waits for the sink indefinitely
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_no_timeout_when_time_passes_then_request_stays_in_flight() {
    // Given: No sink timeout
    let dir = TempDir::new().unwrap();
    let settings = ControllerSettings {
        sink_timeout: None,
        ..ControllerSettings::default()
    };
    let (mut controller, _events) = controller_with(FakeSink::default(), &dir, settings);
    controller.toggle_recording(false).unwrap();

    // When: A long time passes
    tokio::time::advance(Duration::from_secs(600)).await;

    // Then: Still waiting
    assert!(controller.in_flight_deadline().is_none());
    assert!(controller.expire_in_flight(Instant::now()).is_none());
    assert!(controller.is_busy());
}

/// WHAT: Active strictly alternates across accepted toggles
/// WHY: A single call must never double-transition
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_repeated_toggles_when_each_settles_then_active_alternates() {
    // Given: An idle controller
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);

    for round in 0..4 {
        // When: Starting and settling
        controller.toggle_recording(false).unwrap();
        assert!(!controller.is_recording());
        sink.last_start().accepted();
        drain(&mut controller, &mut events);

        // Then: Active
        assert!(controller.is_recording(), "round {round} should be active");

        // When: Stopping and settling
        controller.toggle_recording(false).unwrap();
        assert!(controller.is_recording());
        sink.last_stop().stopped(artifact(dir.path(), &format!("round-{round}.mp4")));
        drain(&mut controller, &mut events);

        // Then: Inactive
        assert!(!controller.is_recording(), "round {round} should be idle");
        assert!(!controller.has_ticker());
    }

    assert_eq!(sink.start_count(), 4);
    assert_eq!(sink.stop_count(), 4);
}

/// WHAT: Flash setting is forwarded to the sink
/// WHY: Video uses the torch the user selected
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_flash_enabled_when_starting_then_sink_receives_flash_option() {
    // Given: An idle controller
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, _events) = controller(sink.clone(), &dir);

    // When: Starting with flash on
    controller.toggle_recording(true).unwrap();

    // Then: The sink was asked for flash
    assert!(sink.last_options().flash_enabled);
}

/// WHAT: Subscribers see every tick
/// WHY: The on-screen timer is driven by the published snapshot
#[tokio::test(start_paused = true)]
#[allow(clippy::unwrap_used)]
async fn given_subscriber_when_ticking_then_snapshot_tracks_elapsed() {
    // Given: A subscriber and a running recording
    let dir = TempDir::new().unwrap();
    let sink = FakeSink::default();
    let (mut controller, mut events) = controller(sink.clone(), &dir);
    let snapshots = controller.subscribe();
    start_recording(&mut controller, &mut events, &sink);

    // When: Two ticks elapse
    apply_ticks(&mut controller, &mut events, 2).await;

    // Then: The published snapshot matches
    let snapshot = *snapshots.borrow();
    assert!(snapshot.active);
    assert_eq!(snapshot.elapsed_seconds, 2);
    assert_eq!(snapshot.in_flight, None);
    assert_eq!(snapshot.elapsed_display(), "00:02");
}
