//! Record timestamps
//!
//! Records carry their signing time as text in RFC 3339 form with whole
//! seconds and a `Z` suffix, e.g. `2024-01-02T15:04:05Z`.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{CoreError, Result};

/// Current time in record format
pub fn now() -> String {
    format(Utc::now())
}

/// Render a UTC time in record format
pub fn format(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a record timestamp
pub fn parse(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp(format!("{}: {}", value, e)))
}
