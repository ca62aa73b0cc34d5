//! Cancellable recurring notifications.
//!
//! The recording controller never sleeps itself. It asks a [`Clock`] for a
//! recurring callback and holds the returned [`TickHandle`] for exactly as
//! long as a session is active.

use std::{fmt, time::Duration};

use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Callback invoked on every tick. Returning `false` ends the schedule.
pub type TickCallback = Box<dyn FnMut() -> bool + Send + 'static>;

/// Source of recurring notifications.
pub trait Clock {
    /// Invoke `on_tick` once per `period`, starting one period from now.
    fn every(&self, period: Duration, on_tick: TickCallback) -> TickHandle;
}

/// Owned handle to a recurring notification.
///
/// Cancels on [`TickHandle::cancel`] or on drop. After cancellation the
/// callback is never invoked again.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    /// Wrap a cancellation routine.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop future firings.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// [`Clock`] backed by a tokio interval task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn every(&self, period: Duration, mut on_tick: TickCallback) -> TickHandle {
        // interval_at panics on a zero period.
        let period = period.max(Duration::from_millis(1));

        let first = Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            // Catch up after a stall so one tick still means one elapsed second.
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;
                if !on_tick() {
                    debug!("Tick receiver gone, ending schedule");
                    break;
                }
            }
        });

        let abort = task.abort_handle();
        TickHandle::new(move || abort.abort())
    }
}
