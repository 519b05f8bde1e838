//! Time-of-day and duration parsing/formatting
//!
//! All race times are wall-clock times of day (`HH:MM:SS.mmm`); durations are
//! rendered in the same shape with hours allowed to exceed 23.

use crate::types::{ClockTime, RaceError, Result};
use chrono::{Duration, Timelike};
use serde::Serializer;

const CLOCK_FORMAT: &str = "%H:%M:%S%.f";

/// Longest accepted seconds field of a start window
const MAX_DELTA_SECONDS: f64 = 1e9;

/// Parse `HH:MM:SS` or `HH:MM:SS.mmm`
///
/// Leap seconds (`:60`) are rejected.
pub fn parse_clock_time(value: &str) -> Option<ClockTime> {
    let time = ClockTime::parse_from_str(value.trim(), CLOCK_FORMAT).ok()?;
    // chrono encodes a leap second as a nanosecond field past one second
    if time.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(time)
}

/// Format a time of day as `HH:MM:SS.mmm`
pub fn format_clock_time(time: ClockTime) -> String {
    time.format("%H:%M:%S%.3f").to_string()
}

/// Parse a start window given as `H:MM:SS` (seconds may carry a fraction)
pub fn parse_start_delta(value: &str) -> Result<Duration> {
    let invalid = |reason: &str| {
        RaceError::InvalidConfig(format!("invalid startDelta '{}': {}", value, reason))
    };

    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(invalid("expected three colon-separated parts"));
    }

    let hours: u32 = parts[0].parse().map_err(|_| invalid("bad hours"))?;
    let minutes: u32 = parts[1].parse().map_err(|_| invalid("bad minutes"))?;
    let seconds: f64 = parts[2].parse().map_err(|_| invalid("bad seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid("bad seconds"));
    }
    if seconds > MAX_DELTA_SECONDS {
        return Err(invalid("out of range"));
    }

    let millis = (seconds * 1000.0).round() as i64;
    Duration::hours(hours as i64)
        .checked_add(&Duration::minutes(minutes as i64))
        .and_then(|d| d.checked_add(&Duration::milliseconds(millis)))
        .ok_or_else(|| invalid("out of range"))
}

/// Format a duration as `HH:MM:SS.mmm`
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.num_milliseconds();
    let sign = if total_ms < 0 { "-" } else { "" };
    let ms = total_ms.unsigned_abs();

    format!(
        "{}{:02}:{:02}:{:02}.{:03}",
        sign,
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

/// Duration in fractional seconds
pub fn as_seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}

/// serde `serialize_with` helper writing a duration as `HH:MM:SS.mmm`
pub fn serialize_duration<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}
