//! # Clock Module
//!
//! Parsing and formatting helpers for the wall-clock times the backend
//! exchanges. Schedule reads serve `HH:MM:SS`, punch writes and some log
//! fields use `HH:MM`, and malformed values must degrade to "absent" rather
//! than fail the whole payload.

use chrono::{Duration, NaiveDate, NaiveTime};

/// Canonical zero reading of the elapsed-time display.
pub const ZERO_ELAPSED: &str = "00:00:00";

/// Wire formats accepted for times of day, tried in order.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parses a time of day leniently.
///
/// Accepts `HH:MM:SS` and `HH:MM`. Returns `None` for empty, whitespace-only
/// or malformed input instead of an error, because schedule payloads routinely
/// carry empty strings where no punch has happened yet.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

/// Parses a `YYYY-MM-DD` calendar date, returning `None` on malformed input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Formats an elapsed duration as `HH:MM:SS`.
///
/// Negative durations clamp to `00:00:00` so a clock step backwards never
/// renders a nonsense reading. The hour field wraps at 24 to keep the display
/// width fixed.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let hours = (total / 3600) % 24;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
