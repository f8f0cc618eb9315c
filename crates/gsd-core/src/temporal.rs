//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC timestamp truncated to seconds precision.
//!
//! SQLite hands timestamps back as text. Rows written by `CURRENT_TIMESTAMP`
//! look like `2026-01-15 12:00:00`, rows written by
//! `strftime('%Y-%m-%d %H:%M:%f', 'now')` carry milliseconds
//! (`2026-01-15 12:00:00.123`). Both are UTC by SQLite's definition and both
//! are accepted by [`Timestamp::parse_sqlite()`].

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GsdError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Parse a timestamp column value as stored by SQLite.
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS` with an optional fractional part, and
    /// falls back to RFC 3339 for values written by other tools.
    pub fn parse_sqlite(s: &str) -> Result<Self, GsdError> {
        let trimmed = s.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(Self(truncate_to_seconds(naive.and_utc())));
        }
        Self::parse_rfc3339(trimmed)
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    pub fn parse_rfc3339(s: &str) -> Result<Self, GsdError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| GsdError::Timestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Compact form used in export file names (`20260115_120000`).
    pub fn to_file_stamp(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
