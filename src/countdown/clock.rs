//! Wall-clock source sampled by countdown sessions

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that advances with tokio's clock, so paused-time tests see the wall
/// clock move exactly as far as the runtime has advanced.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RuntimeClock {
    wall: DateTime<Utc>,
    start: tokio::time::Instant,
}

#[cfg(test)]
impl RuntimeClock {
    pub(crate) fn starting_at(wall: DateTime<Utc>) -> Self {
        Self {
            wall,
            start: tokio::time::Instant::now(),
        }
    }
}

#[cfg(test)]
impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<Utc> {
        self.wall + chrono::Duration::from_std(self.start.elapsed()).unwrap()
    }
}
