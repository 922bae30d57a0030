//! # relman-core: Foundational Types for Release Manifest Validation
//!
//! This crate is the leaf of the relman workspace. It defines the primitive
//! validators and domain types every other crate builds on; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Pure predicates.** `validate_name`, `validate_semver`,
//!    `validate_location_hash` and `is_known_country` are total functions
//!    over `&str`. They never panic and never allocate an error.
//!
//! 2. **Numeric version ordering.** [`Version`] derives `Ord` over
//!    `(major, minor, patch)`, so `9.0.0 < 10.0.0` holds by construction.
//!    Components have no width limit and never overflow.
//!
//! 3. **Closed enums for matcher vocabularies.** [`MatcherType`] and
//!    [`Severity`] are exhaustive; adding a variant forces every `match`
//!    in the validation engine to handle it.
//!
//! 4. **UTC-normalized timestamps.** [`Timestamp`] stores `DateTime<Utc>`;
//!    timezone-naive inputs are interpreted as UTC.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `relman-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod country;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod semver;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use country::{is_known_country, COUNTRY_CODES};
pub use error::RelmanError;
pub use identity::{
    manifest_filename, notes_filename, validate_name, AppName, EnvironmentName,
    FALLBACK_LOCALE,
};
pub use matcher::{validate_location_hash, MatcherType, Severity, LOCATION_HASH_LEN};
pub use semver::{parse_semver, validate_semver, Component, Version};
pub use temporal::{validate_iso8601, Timestamp, ValidationClock, MAX_RELEASE_AGE_DAYS};
