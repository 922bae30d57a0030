//! # Temporal Types: UTC Release Timestamps
//!
//! Defines [`Timestamp`], a UTC timestamp parsed leniently from ISO 8601
//! input, and [`ValidationClock`], the single source of "now" for every
//! date rule in the validation engine.
//!
//! ## Accepted Input
//!
//! `released_at` values in manifests are written by hand, so parsing
//! accepts the ISO 8601 shapes people actually type:
//!
//! - RFC 3339 with `Z` or a numeric offset: `2026-01-10T09:00:00Z`,
//!   `2026-01-10T09:00:00+02:00`
//! - A space instead of `T`: `2026-01-10 09:00:00+00:00`
//! - Optional fractional seconds, optional seconds
//! - Timezone-naive date-times and plain dates, interpreted as UTC
//! - The basic (separator-free) layouts: `20260110T090000Z`,
//!   `20260110T0900+0200`, `20260110`
//!
//! All results are normalized to UTC. Offsets are converted, not rejected.
//!
//! ## Clock
//!
//! Date rules ("not in the future", "not older than 365 days") are
//! evaluated against an explicit [`ValidationClock`] rather than reading the
//! system time inside validators, so every rule is deterministic under test.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RelmanError;

/// Oldest permitted release age, in days, relative to the validation clock.
pub const MAX_RELEASE_AGE_DAYS: i64 = 365;

/// Offset-carrying layouts tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%z",
];

/// Timezone-naive layouts; interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Plain dates; midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a `chrono::DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an ISO 8601 timestamp, converting any offset to UTC.
    ///
    /// A trailing `Z` is the UTC offset. Inputs without an offset are
    /// treated as UTC. A bare date resolves to midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns [`RelmanError::InvalidTimestamp`] if no accepted layout
    /// matches.
    pub fn parse_iso8601(s: &str) -> Result<Self, RelmanError> {
        if s.is_empty() {
            return Err(RelmanError::InvalidTimestamp {
                input: s.to_string(),
                reason: "empty string".to_string(),
            });
        }

        let rfc3339_err = match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => return Ok(Self(dt.with_timezone(&Utc))),
            Err(e) => e,
        };

        let with_offset = match s.strip_suffix(['Z', 'z']) {
            Some(head) => format!("{head}+00:00"),
            None => s.to_string(),
        };
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
                return Ok(Self(dt.with_timezone(&Utc)));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(naive.and_utc()));
            }
        }

        for fmt in DATE_FORMATS {
            if let Some(midnight) = NaiveDate::parse_from_str(s, fmt)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
            {
                return Ok(Self(midnight.and_utc()));
            }
        }

        Err(RelmanError::InvalidTimestamp {
            input: s.to_string(),
            reason: rfc3339_err.to_string(),
        })
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 with `Z` suffix, seconds precision.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// This timestamp shifted back by `days` whole days.
    pub fn days_before(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Returns true iff `s` parses as an ISO 8601 timestamp.
pub fn validate_iso8601(s: &str) -> bool {
    Timestamp::parse_iso8601(s).is_ok()
}

/// The instant a validation run treats as "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationClock {
    now: Timestamp,
}

impl ValidationClock {
    /// A clock pinned to the current system time.
    pub fn system() -> Self {
        Self {
            now: Timestamp::now(),
        }
    }

    /// A clock pinned to a fixed instant.
    pub fn fixed(now: Timestamp) -> Self {
        Self { now }
    }

    /// The instant this clock reports.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// The earliest `released_at` still inside the retention window.
    pub fn oldest_allowed(&self) -> Timestamp {
        self.now.days_before(MAX_RELEASE_AGE_DAYS)
    }

    /// True if `ts` lies after the clock's instant.
    pub fn is_future(&self, ts: Timestamp) -> bool {
        ts > self.now
    }

    /// True if `ts` lies before the retention window.
    pub fn is_expired(&self, ts: Timestamp) -> bool {
        ts < self.oldest_allowed()
    }
}

impl Default for ValidationClock {
    fn default() -> Self {
        Self::system()
    }
}
