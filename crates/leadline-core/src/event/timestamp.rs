//! Lenient timestamp handling for the three history collections.
//!
//! Timestamps stay as raw strings on the input records: the reconciliation
//! dedup key is built from the raw text, and a value that fails to parse
//! must drop one entry rather than the whole page.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserializer;

use super::lenient;

/// Parse a backend timestamp.
///
/// Accepted forms, in order:
/// - RFC 3339 (`2024-03-01T09:30:00Z`, `2024-03-01T09:30:00+05:45`)
/// - naive `YYYY-MM-DDTHH:MM:SS[.f]` or `YYYY-MM-DD HH:MM:SS[.f]`, read as UTC
/// - bare `YYYY-MM-DD`, read as UTC midnight
/// - all-digit strings, read as epoch milliseconds
///
/// Returns `None` for anything else, including the empty string.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis);
    }

    None
}

/// Deserialize an optional timestamp that may arrive as a string, an
/// integer (epoch milliseconds), or `null`.
///
/// Integers are rendered back to their decimal text so [`parse_timestamp`]
/// handles both shapes the same way. Fractional numbers stay as text and
/// fail to parse later. Any other shape (a boolean, an object) reads as
/// `None`, which drops that one entry.
pub fn deserialize_raw<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::text(deserializer)
}
