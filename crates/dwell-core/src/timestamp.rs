//! Jira timestamp parsing and duration arithmetic.
//!
//! Jira reports instants as `2023-01-02T14:30:00.123+0000`. Every comparison
//! in this crate is done on parsed, offset-aware values.

use chrono::{DateTime, FixedOffset};

/// Format string for Jira changelog and field timestamps.
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// An offset-aware instant as reported by Jira.
pub type Timestamp = DateTime<FixedOffset>;

/// Error type for timestamp parsing.
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("malformed timestamp '{value}': {source}")]
    Malformed {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parses a Jira timestamp into an offset-aware instant.
///
/// Both `+0000` and `+00:00` offsets are accepted. Fractional seconds are
/// optional.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TimestampError> {
    DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT).map_err(|source| {
        TimestampError::Malformed {
            value: value.to_string(),
            source,
        }
    })
}

/// Returns `end - start` in seconds, with microsecond precision.
///
/// Positive when `end` is later than `start`.
pub fn seconds_between(start: &Timestamp, end: &Timestamp) -> f64 {
    let span = end.signed_duration_since(*start);
    match span.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // Only reachable for spans of hundreds of thousands of years.
        None => span.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Formats an instant back into Jira's wire format.
///
/// Milliseconds are always written; sub-millisecond instants keep their
/// extra digits.
pub fn format_timestamp(ts: &Timestamp) -> String {
    let nanos = ts.timestamp_subsec_nanos();
    let format = if nanos % 1_000_000 == 0 {
        "%Y-%m-%dT%H:%M:%S%.3f%z"
    } else if nanos % 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S%.6f%z"
    } else {
        "%Y-%m-%dT%H:%M:%S%.9f%z"
    };
    ts.format(format).to_string()
}
