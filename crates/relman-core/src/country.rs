//! # Country Allow-List
//!
//! `country` matchers may only target the markets the product ships in.
//! This is a curated subset of ISO 3166-1 alpha-2, not the full standard:
//! a real but unlisted code (e.g. `JP`) is rejected exactly like a
//! malformed one.
//!
//! Codes are uppercase. The list is kept sorted so membership is a binary
//! search.

/// Country codes accepted in `country` matchers, sorted ascending.
pub const COUNTRY_CODES: &[&str] = &[
    "AT", "BE", "BG", "CH", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "GR", "HR",
    "HU", "IE", "IS", "IT", "LT", "LU", "LV", "MT", "NL", "NO", "PL", "PT", "RO", "SE", "SI",
    "SK", "US",
];

/// Returns true iff `code` is in the curated allow-list.
pub fn is_known_country(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}
