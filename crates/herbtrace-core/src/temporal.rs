//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines [`Timestamp`], a UTC-only timestamp truncated to seconds
//! precision. Persisted documents are rewritten whole on every mutation, so
//! the same instant must always serialize to the same bytes; local offsets
//! and sub-second noise would break that.
//!
//! Mutating operations never read the wall clock — they take the transaction
//! timestamp supplied by the ledger platform, which is identical on every
//! executor. `Timestamp::now()` exists for the in-memory ledger and the CLI,
//! which play the platform's role themselves.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A UTC timestamp with seconds precision, rendered as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Serde goes through [`Timestamp::to_iso8601`] / [`Timestamp::parse`] so
/// the persisted form is exactly the documented one, independent of chrono's
/// default formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s).map_err(de::Error::custom)
    }
}

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse an RFC 3339 string, accepting any offset and converting to UTC.
    ///
    /// Harvest and test dates arrive from callers in whatever offset their
    /// gateway produced; the result is always UTC at seconds precision.
    ///
    /// A bare date (`YYYY-MM-DD`) is accepted as midnight UTC of that day —
    /// harvest dates are commonly recorded without a time of day.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))));
        }
        let date = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| Error::MalformedArgument(format!("invalid date {s:?}: {e}")))?;
        let dt = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::MalformedArgument(format!("invalid date {s:?}")))?
            .and_utc();
        Ok(Self(dt))
    }

    /// From a Unix epoch timestamp in seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, Error> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| Error::MalformedArgument(format!("invalid unix timestamp: {secs}")))
    }

    /// The Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Calendar month, 1-12. Seasonal windows are keyed by month.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 with Z suffix (e.g. `2024-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
