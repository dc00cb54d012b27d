//! UTC timestamp helpers shared by the model and the store mappers.
//!
//! Stored form is `YYYY-MM-DDTHH:MM:SS.ffffffZ`. Reads also accept RFC 3339
//! values with any offset and offset-naive values, which are taken as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

pub type Timestamp = DateTime<Utc>;

const STORE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Current wall-clock time in UTC.
pub fn utc_now() -> Timestamp {
    Utc::now()
}

/// Formats a timestamp in the canonical stored representation.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.format(STORE_FORMAT).to_string()
}

/// Parses a stored timestamp, normalizing any offset to UTC.
///
/// Returns `None` for text that matches none of the accepted shapes.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(trimmed, OFFSET_FORMAT) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}
