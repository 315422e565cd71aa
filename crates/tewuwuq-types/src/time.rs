//! Epoch-millisecond helpers.
//!
//! Timestamps are stored as milliseconds since the Unix epoch, the same
//! representation the browser's `Date.now()` produces.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};

const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn to_local(millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(millis).single()
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` in local time.
/// Out-of-range values format as an empty string.
pub fn format_minute(millis: i64) -> String {
    to_local(millis)
        .map(|dt| dt.format(MINUTE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Whether `text` is exactly a `YYYY-MM-DD HH:MM` stamp as produced by
/// [`format_minute`].
pub fn is_minute_stamp(text: &str) -> bool {
    text.len() == "0000-00-00 00:00".len()
        && NaiveDateTime::parse_from_str(text, MINUTE_FORMAT).is_ok()
}

/// Format a timestamp as a calendar day, e.g. `Monday, 19 October 2026`.
pub fn format_day(millis: i64) -> String {
    to_local(millis)
        .map(|dt| dt.format("%A, %-d %B %Y").to_string())
        .unwrap_or_default()
}

/// Whether two timestamps fall on the same local calendar day.
/// A zero timestamp never matches anything.
pub fn is_same_day(a: i64, b: i64) -> bool {
    if a == 0 || b == 0 {
        return false;
    }
    match (to_local(a), to_local(b)) {
        (Some(a), Some(b)) => a.year() == b.year() && a.ordinal() == b.ordinal(),
        _ => false,
    }
}
