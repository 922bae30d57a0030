//! # Matcher Vocabulary
//!
//! A matcher ties a targeting criterion to a rollout severity for one
//! release version. Both vocabularies are closed:
//!
//! | `matcher_type`  | `matcher_value`                      |
//! |-----------------|--------------------------------------|
//! | `default`       | none                                 |
//! | `country`       | ISO 3166-1 alpha-2 code (allow-list) |
//! | `location_hash` | 64 lowercase hex characters          |
//!
//! Severities are `green`, `yellow` and `red`; the validator treats them as
//! opaque labels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RelmanError;

/// Required length of a location hash.
pub const LOCATION_HASH_LEN: usize = 64;

/// Targeting criterion of a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherType {
    /// Catch-all rule; exactly one per version.
    Default,
    /// Matches clients in one country.
    Country,
    /// Matches clients at one hashed location.
    LocationHash,
}

impl MatcherType {
    /// All matcher types in canonical order.
    pub fn all() -> &'static [MatcherType] {
        &[Self::Default, Self::Country, Self::LocationHash]
    }

    /// The identifier used in manifest files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Country => "country",
            Self::LocationHash => "location_hash",
        }
    }

    /// Whether this matcher type targets a specific `matcher_value`.
    pub fn takes_value(&self) -> bool {
        match self {
            Self::Default => false,
            Self::Country | Self::LocationHash => true,
        }
    }
}

impl std::fmt::Display for MatcherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatcherType {
    type Err = RelmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "country" => Ok(Self::Country),
            "location_hash" => Ok(Self::LocationHash),
            other => Err(RelmanError::UnknownValue {
                kind: "matcher_type",
                input: other.to_string(),
            }),
        }
    }
}

/// Rollout risk/urgency signal attached to a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl Severity {
    /// All severities in canonical order.
    pub fn all() -> &'static [Severity] {
        &[Self::Green, Self::Yellow, Self::Red]
    }

    /// The identifier used in manifest files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RelmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            other => Err(RelmanError::UnknownValue {
                kind: "severity",
                input: other.to_string(),
            }),
        }
    }
}

/// Location hash pattern: exactly 64 lowercase hex characters.
pub fn validate_location_hash(s: &str) -> bool {
    s.len() == LOCATION_HASH_LEN
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
