//! # Error Types
//!
//! Errors raised by the primitive constructors in this crate. The validation
//! engine never surfaces these to users directly: it converts each failure
//! into a human-readable entry in a per-file error list.

use thiserror::Error;

/// Top-level error type for relman primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelmanError {
    /// Input does not match the required textual format.
    #[error("invalid {kind} format: {input:?}")]
    InvalidFormat {
        /// What was being parsed (e.g. "semantic version").
        kind: &'static str,
        /// The rejected input.
        input: String,
    },

    /// Input is well-formed but not a member of a closed vocabulary.
    #[error("unknown {kind}: {input:?}")]
    UnknownValue {
        /// Vocabulary name (e.g. "severity").
        kind: &'static str,
        /// The rejected input.
        input: String,
    },

    /// Timestamp could not be parsed as ISO 8601.
    #[error("invalid ISO 8601 timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}
