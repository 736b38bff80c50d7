//! Hour-of-day extraction from admission times.
//!
//! The export stores `hospitaladmittime24` as a wall-clock time (`14:36:00`);
//! full timestamps are accepted as well. No time zone conversion is applied.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Hour (0-23) of an admission time, `None` when it cannot be read.
pub fn parse_admit_hour(value: &str) -> Option<u8> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let hour = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(|time| time.hour())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.hour())
        })?;
    u8::try_from(hour).ok()
}
