//! Remaining-time breakdown and its computation

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Remaining time split into days, hours, minutes and seconds.
///
/// `hours < 24`, `minutes < 60` and `seconds < 60` always hold; `days` is
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    /// The expired breakdown
    pub const ZERO: Breakdown = Breakdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Split a whole number of seconds into its units
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Reconstitute the breakdown into whole seconds
    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    /// Check if the countdown has run out
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Compute the time left from `now` until `target`.
///
/// Sub-second remainders are dropped. A target at or before `now` yields
/// [`Breakdown::ZERO`], so no negative value is ever produced.
pub fn compute(now: DateTime<Utc>, target: DateTime<Utc>) -> Breakdown {
    let delta = target.signed_duration_since(now);
    // num_seconds truncates toward zero, which is a floor for positive deltas
    match u64::try_from(delta.num_seconds()) {
        Ok(total) if total > 0 => Breakdown::from_total_seconds(total),
        _ => Breakdown::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 31, 18, 30, 0).unwrap()
    }

    #[test]
    fn one_of_each_unit() {
        let now = base();
        let b = compute(now, now + Duration::seconds(90_061));
        assert_eq!(b, Breakdown { days: 1, hours: 1, minutes: 1, seconds: 1 });
    }

    #[test]
    fn under_a_minute() {
        let now = base();
        let b = compute(now, now + Duration::seconds(59));
        assert_eq!(b, Breakdown { days: 0, hours: 0, minutes: 0, seconds: 59 });
    }

    #[test]
    fn past_target_is_zero() {
        let now = base();
        assert_eq!(compute(now, now - Duration::seconds(5)), Breakdown::ZERO);
        assert_eq!(compute(now, now - Duration::days(400)), Breakdown::ZERO);
    }

    #[test]
    fn target_equal_to_now_is_zero() {
        let now = base();
        assert!(compute(now, now).is_zero());
    }

    #[test]
    fn sub_second_remainder_is_dropped() {
        let now = base();
        let b = compute(now, now + Duration::milliseconds(2_999));
        assert_eq!(b.total_seconds(), 2);
        assert!(compute(now, now + Duration::milliseconds(400)).is_zero());
    }

    #[test]
    fn reconstructs_whole_seconds_and_respects_bounds() {
        let now = base();
        for secs in [0_i64, 1, 59, 60, 61, 3_599, 3_600, 86_399, 86_400, 90_061, 1_000_000, 31_536_000] {
            let b = compute(now, now + Duration::seconds(secs));
            assert_eq!(b.total_seconds(), secs as u64);
            assert!(b.hours < 24);
            assert!(b.minutes < 60);
            assert!(b.seconds < 60);
        }
    }

    #[test]
    fn non_increasing_as_now_advances() {
        let target = base() + Duration::seconds(200);
        let mut previous = u64::MAX;
        for step in 0..=250 {
            let now = base() + Duration::milliseconds(step * 999);
            let total = compute(now, target).total_seconds();
            assert!(total <= previous);
            previous = total;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn displays_padded_units() {
        assert_eq!(Breakdown::ZERO.to_string(), "00:00:00:00");
        let b = Breakdown { days: 120, hours: 3, minutes: 4, seconds: 5 };
        assert_eq!(b.to_string(), "120:03:04:05");
    }

    #[test]
    fn serializes_unit_fields() {
        let b = Breakdown::from_total_seconds(90_061);
        assert_eq!(
            serde_json::to_value(b).unwrap(),
            serde_json::json!({"days": 1, "hours": 1, "minutes": 1, "seconds": 1})
        );
    }
}
