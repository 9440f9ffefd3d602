//! Live countdown session

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use super::{compute, Breakdown, Clock, SystemClock};

/// Period between two recomputations
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle owned by whoever displays a live countdown.
///
/// Cancelling stops future ticks and releases the timer. Dropping the handle
/// cancels the session.
#[derive(Debug)]
pub struct SessionHandle {
    target: DateTime<Utc>,
    /// Cancelled flag. Held by the session for the whole of each tick.
    gate: Arc<Mutex<bool>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// A callback that panicked must not wedge cancellation
fn lock_gate(gate: &Mutex<bool>) -> MutexGuard<'_, bool> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionHandle {
    /// Target instant this session counts down to
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Stop the session. Calling it again is a no-op.
    ///
    /// Waits for a tick that is already running, so no callback starts or
    /// runs once this returns. Must not be called from the session's own
    /// `on_tick`.
    pub fn cancel(&self) {
        {
            let mut cancelled = lock_gate(&self.gate);
            if *cancelled {
                return;
            }
            *cancelled = true;
        }

        if let Ok(mut task) = self.task.lock() {
            if let Some(task) = task.take() {
                task.abort();
            }
        }
        debug!("Countdown session to {} cancelled", self.target);
    }

    /// Check if the session was cancelled by its owner
    pub fn is_cancelled(&self) -> bool {
        *lock_gate(&self.gate)
    }

    /// Check if the session no longer ticks, either because it expired or
    /// because it was cancelled
    pub fn is_finished(&self) -> bool {
        self.task
            .lock()
            .map(|task| task.as_ref().map_or(true, |task| task.is_finished()))
            .unwrap_or(true)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a live countdown against the system clock.
///
/// `on_tick` receives a fresh breakdown immediately and then once per
/// [`TICK_PERIOD`]. The session emits the zero breakdown once and stops.
/// Must be called from within a tokio runtime.
pub fn run_live_session<F>(target: DateTime<Utc>, on_tick: F) -> SessionHandle
where
    F: FnMut(Breakdown) + Send + 'static,
{
    run_live_session_with_clock(Arc::new(SystemClock), target, on_tick)
}

/// Start a live countdown that samples `clock` at every tick
pub fn run_live_session_with_clock<F>(
    clock: Arc<dyn Clock>,
    target: DateTime<Utc>,
    mut on_tick: F,
) -> SessionHandle
where
    F: FnMut(Breakdown) + Send + 'static,
{
    let gate = Arc::new(Mutex::new(false));
    let task_gate = Arc::clone(&gate);

    debug!("Starting countdown session to {}", target);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        // A stalled process resumes on the next tick, without catch-up ticks
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let breakdown = {
                let cancelled = lock_gate(&task_gate);
                if *cancelled {
                    break;
                }
                let breakdown = compute(clock.now(), target);
                on_tick(breakdown);
                breakdown
            };

            if breakdown.is_zero() {
                debug!("Countdown to {} expired, stopping session", target);
                break;
            }
        }
    });

    SessionHandle {
        target,
        gate,
        task: Mutex::new(Some(task)),
    }
}
