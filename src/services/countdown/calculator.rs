use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time left until a deadline, split into calendar-free units.
///
/// All fields are zero when `overdue` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub overdue: bool,
}

impl CountdownSnapshot {
    pub const OVERDUE: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        overdue: true,
    };

    /// Remaining seconds the snapshot was built from (zero when overdue).
    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY as u64
            + u64::from(self.hours) * SECONDS_PER_HOUR as u64
            + u64::from(self.minutes) * SECONDS_PER_MINUTE as u64
            + u64::from(self.seconds)
    }

    pub fn urgency(&self) -> CountdownUrgency {
        if self.overdue {
            return CountdownUrgency::Overdue;
        }

        let total = self.total_seconds();
        if total < SECONDS_PER_HOUR as u64 {
            CountdownUrgency::Urgent
        } else if total < SECONDS_PER_DAY as u64 {
            CountdownUrgency::Soon
        } else {
            CountdownUrgency::OnTime
        }
    }
}

/// Badge classification for a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownUrgency {
    /// A day or more remaining
    OnTime,
    /// Less than a day remaining
    Soon,
    /// Less than an hour remaining
    Urgent,
    /// Deadline reached or passed
    Overdue,
}

/// Whole seconds from `now` until `deadline`. Negative once the deadline
/// has passed; sub-second remainders are dropped.
pub fn remaining_seconds(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    deadline.signed_duration_since(now).num_seconds()
}

/// Decompose the time left until `deadline` as seen at `now`.
///
/// A deadline that is exactly `now` is overdue, not "0 seconds left".
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use task_reminder::services::countdown::compute_countdown;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let deadline = Utc.with_ymd_and_hms(2024, 1, 3, 5, 30, 15).unwrap();
/// let snapshot = compute_countdown(deadline, now);
/// assert_eq!((snapshot.days, snapshot.hours, snapshot.minutes, snapshot.seconds), (2, 5, 30, 15));
/// assert!(!snapshot.overdue);
/// ```
pub fn compute_countdown(deadline: DateTime<Utc>, now: DateTime<Utc>) -> CountdownSnapshot {
    let remaining = remaining_seconds(deadline, now);
    if remaining <= 0 {
        return CountdownSnapshot::OVERDUE;
    }

    let days = remaining / SECONDS_PER_DAY;
    let rest = remaining % SECONDS_PER_DAY;
    let hours = rest / SECONDS_PER_HOUR;
    let rest = rest % SECONDS_PER_HOUR;
    let minutes = rest / SECONDS_PER_MINUTE;
    let seconds = rest % SECONDS_PER_MINUTE;

    // remaining > 0, so every part is non-negative and the sub-day parts fit in u32
    CountdownSnapshot {
        days: days as u64,
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
        overdue: false,
    }
}

/// Countdown for a deadline that may be missing or unreadable. Those are
/// treated as already overdue.
pub fn snapshot_for(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CountdownSnapshot {
    match deadline {
        Some(deadline) => compute_countdown(deadline, now),
        None => CountdownSnapshot::OVERDUE,
    }
}
