//! Recording-session lifecycle and timer coordination.

mod controller;
mod event;
mod notice;
mod recording_session;

pub use {
    controller::{
        ControllerSettings, DEFAULT_SINK_TIMEOUT, DEFAULT_TICK_PERIOD, RecordingController,
        ToggleOutcome,
    },
    event::SessionEvent,
    notice::SessionNotice,
    recording_session::{InFlight, RecordingSession, SessionSnapshot},
};
