//! Countdown timer display

use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::countdown::{compute, run_live_session_with_clock, Breakdown, Clock, SessionHandle, SystemClock};

/// Labels shown under each unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self {
            days: "Days".to_string(),
            hours: "Hours".to_string(),
            minutes: "Minutes".to_string(),
            seconds: "Seconds".to_string(),
        }
    }
}

/// Presentation overrides for a countdown timer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: UnitLabels,
}

impl CountdownProps {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_labels(mut self, labels: UnitLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// Hook fired once when the countdown first reaches zero
pub type ExpireHook = Box<dyn FnOnce() + Send + 'static>;

/// How a countdown timer samples time and reports expiry
pub struct MountOptions {
    pub clock: Arc<dyn Clock>,
    pub on_expire: Option<ExpireHook>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            on_expire: None,
        }
    }
}

/// One unit cell of the rendered countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitView {
    pub label: String,
    pub value: u64,
    pub padded: String,
}

/// Rendered countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target: DateTime<Utc>,
    pub breakdown: Breakdown,
    pub units: Vec<UnitView>,
    pub display: String,
    pub expired: bool,
}

/// A mounted countdown display. Owns its live session; dropping the timer
/// cancels the session.
#[derive(Debug)]
pub struct CountdownTimer {
    props: CountdownProps,
    latest: Arc<Mutex<Breakdown>>,
    session: SessionHandle,
}

impl CountdownTimer {
    /// Mount a timer against the system clock
    pub fn mount(target: DateTime<Utc>, props: CountdownProps) -> Self {
        Self::mount_with(target, props, MountOptions::default())
    }

    /// Mount a timer with an explicit clock and optional expiry hook
    pub fn mount_with(target: DateTime<Utc>, props: CountdownProps, options: MountOptions) -> Self {
        let MountOptions { clock, mut on_expire } = options;

        let latest = Arc::new(Mutex::new(compute(clock.now(), target)));
        let tick_latest = Arc::clone(&latest);

        let session = run_live_session_with_clock(clock, target, move |breakdown| {
            match tick_latest.lock() {
                Ok(mut latest) => *latest = breakdown,
                Err(e) => warn!("Failed to lock countdown breakdown: {}", e),
            }
            if breakdown.is_zero() {
                if let Some(hook) = on_expire.take() {
                    hook();
                }
            }
        });

        debug!("Mounted countdown {:?} to {}", props.title, target);
        Self { props, latest, session }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.session.target()
    }

    pub fn props(&self) -> &CountdownProps {
        &self.props
    }

    /// Latest breakdown published by the session
    pub fn breakdown(&self) -> Breakdown {
        self.latest
            .lock()
            .map(|latest| *latest)
            .unwrap_or(Breakdown::ZERO)
    }

    /// Check if the session still ticks
    pub fn is_live(&self) -> bool {
        !self.session.is_finished()
    }

    /// Tear the display down, releasing its timer
    pub fn unmount(&self) {
        self.session.cancel();
    }

    /// Render the current state of the countdown
    pub fn render(&self) -> CountdownView {
        let breakdown = self.breakdown();
        let labels = &self.props.labels;
        let units = [
            (&labels.days, breakdown.days),
            (&labels.hours, breakdown.hours),
            (&labels.minutes, breakdown.minutes),
            (&labels.seconds, breakdown.seconds),
        ]
        .into_iter()
        .map(|(label, value)| UnitView {
            label: label.clone(),
            value,
            padded: format!("{:02}", value),
        })
        .collect();

        CountdownView {
            title: self.props.title.clone(),
            description: self.props.description.clone(),
            target: self.target(),
            breakdown,
            units,
            display: breakdown.to_string(),
            expired: breakdown.is_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::clock::RuntimeClock;
    use chrono::TimeZone;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use tokio::time::sleep;

    fn wall() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap()
    }

    fn options() -> MountOptions {
        MountOptions {
            clock: Arc::new(RuntimeClock::starting_at(wall())),
            on_expire: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn renders_live_breakdown() {
        let timer = CountdownTimer::mount_with(
            wall() + chrono::Duration::seconds(90_061),
            CountdownProps::new("Sale ends in").with_description("Up to 30% off making charges"),
            options(),
        );

        let view = timer.render();
        assert_eq!(view.display, "01:01:01:01");
        assert_eq!(view.title.as_deref(), Some("Sale ends in"));
        assert_eq!(view.description.as_deref(), Some("Up to 30% off making charges"));
        assert_eq!(
            view.units.iter().map(|u| u.label.as_str()).collect::<Vec<_>>(),
            vec!["Days", "Hours", "Minutes", "Seconds"]
        );
        assert_eq!(view.units[3].padded, "01");
        assert!(!view.expired);

        sleep(Duration::from_millis(2_500)).await;
        // 90_059s left: one day, one hour, no minutes
        assert_eq!(timer.breakdown().seconds, 59);
        assert_eq!(timer.breakdown().minutes, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn label_overrides_are_rendered() {
        let labels = UnitLabels {
            days: "D".to_string(),
            hours: "H".to_string(),
            minutes: "M".to_string(),
            seconds: "S".to_string(),
        };
        let timer = CountdownTimer::mount_with(
            wall() + chrono::Duration::seconds(5),
            CountdownProps::new("Soon").with_labels(labels),
            options(),
        );

        let view = timer.render();
        assert_eq!(view.units[0].label, "D");
        assert_eq!(view.units[3].value, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_hook_fires_once_and_display_freezes() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let timer = CountdownTimer::mount_with(
            wall() + chrono::Duration::seconds(2),
            CountdownProps::new("Flash sale"),
            MountOptions {
                clock: Arc::new(RuntimeClock::starting_at(wall())),
                on_expire: Some(Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            },
        );

        sleep(Duration::from_secs(10)).await;
        let view = timer.render();
        assert!(view.expired);
        assert_eq!(view.display, "00:00:00:00");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_stops_updates() {
        let timer = CountdownTimer::mount_with(
            wall() + chrono::Duration::seconds(600),
            CountdownProps::new("Countdown"),
            options(),
        );

        sleep(Duration::from_millis(1_500)).await;
        timer.unmount();
        timer.unmount();
        sleep(Duration::from_secs(5)).await;

        assert_eq!(timer.breakdown().total_seconds(), 599);
        assert!(!timer.is_live());
    }
}
