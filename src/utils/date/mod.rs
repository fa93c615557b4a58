// Date utility functions
// Deadline parsing, storage encoding and the clock abstraction

use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

/// Naive layouts accepted from form-style input, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("deadline is required")]
    Empty,
    #[error("unrecognised deadline format: {0}")]
    Format(String),
    #[error("deadline {0} does not exist in time zone {1}")]
    NonExistent(String, Tz),
    #[error("deadline {0} is outside the years 0000 to 9999")]
    OutOfRange(String),
}

/// Years whose storage form is fixed width and reads back.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse a user-supplied deadline.
///
/// RFC 3339 input carries its own offset. Naive input (as produced by an
/// HTML `datetime-local` field) is interpreted in `tz`; when a local time is
/// ambiguous because of a DST fold the earlier instant wins.
///
/// # Examples
/// ```
/// use task_reminder::utils::date::parse_deadline;
/// let deadline = parse_deadline("2024-01-03T05:30", chrono_tz::UTC).unwrap();
/// assert_eq!(deadline.to_rfc3339(), "2024-01-03T05:30:00+00:00");
/// ```
pub fn parse_deadline(input: &str, tz: Tz) -> Result<DateTime<Utc>, DateParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    let deadline = match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => parse_local(input, tz)?,
    };

    if !STORABLE_YEARS.contains(&deadline.year()) {
        return Err(DateParseError::OutOfRange(input.to_string()));
    }
    Ok(deadline)
}

fn parse_local(input: &str, tz: Tz) -> Result<DateTime<Utc>, DateParseError> {
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| DateParseError::Format(input.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(DateParseError::NonExistent(input.to_string(), tz)),
    }
}

/// Encode a timestamp for the store. Fixed width UTC text, so lexical
/// ordering in SQL matches chronological ordering.
pub fn to_storage(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decode a stored timestamp. Returns `None` for anything unreadable.
///
/// Naive values (written by older front-ends straight from the form) are
/// read as UTC, which is how SQLite's own date functions treat them.
pub fn from_storage(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}
