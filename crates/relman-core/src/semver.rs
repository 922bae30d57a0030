//! # Semantic Versions
//!
//! Release versions are plain `major.minor.patch` triples of non-negative
//! integers. Pre-release and build suffixes (`1.0.0-alpha`, `1.0.0+build`),
//! a leading `v`, and any other decoration are rejected.
//!
//! Components have no width limit: `99999999999999999999.0.0` is a valid
//! version. Each component is kept as its digit string with leading zeros
//! stripped, and compares numerically (shorter is smaller, equal lengths
//! compare digit by digit). The derived `Ord` on [`Version`] relies on
//! field declaration order; do not reorder the fields.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::RelmanError;

/// One non-negative integer component of a version, of any width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(String);

impl Component {
    /// Build a component from ASCII digits. Leading zeros are dropped.
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Canonical decimal form, without leading zeros.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Component {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed `major.minor.patch` version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major component.
    pub major: Component,
    /// Minor component.
    pub minor: Component,
    /// Patch component.
    pub patch: Component,
}

impl Version {
    /// Construct a version from numeric components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
        }
    }

    /// Parse a version string of the form `^\d+\.\d+\.\d+$`.
    ///
    /// Only ASCII digits are accepted; components may be arbitrarily long.
    pub fn parse(s: &str) -> Result<Self, RelmanError> {
        let invalid = || RelmanError::InvalidFormat {
            kind: "semantic version",
            input: s.to_string(),
        };

        let mut parts = s.split('.');
        let mut next_component = || -> Result<Component, RelmanError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            Ok(Component::from_digits(part))
        };

        let major = next_component()?;
        let minor = next_component()?;
        let patch = next_component()?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = RelmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns true iff `s` is a well-formed `major.minor.patch` version.
pub fn validate_semver(s: &str) -> bool {
    Version::parse(s).is_ok()
}

/// Parse `s` into a numerically ordered [`Version`].
pub fn parse_semver(s: &str) -> Result<Version, RelmanError> {
    Version::parse(s)
}
