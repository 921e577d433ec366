//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse a Notion date string
///
/// Accepts RFC 3339 timestamps (`2024-01-15T10:30:00.000Z`), bare dates
/// (`2024-01-15`) and local date-times without an offset, which are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Format a date string for display (like "January 15, 2024")
///
/// Unparseable input is returned unchanged.
pub fn full_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%B %d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Current time in the format Notion uses for timestamps
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
