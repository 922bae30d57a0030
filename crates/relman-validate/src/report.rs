//! Aggregated validation results.
//!
//! A [`ValidationReport`] maps a file key (`pos--live.yml`,
//! `notes/pos--1.0.0.yml`, `config.yml`) to the errors found for it. Keys
//! are kept sorted so rendering is deterministic. Files without errors have
//! no entry; a report is valid iff it is empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Line printed when the corpus has no errors.
pub const SUCCESS_MESSAGE: &str = "All manifest and notes files are valid";

/// Header printed before the per-file error listing.
pub const FAILURE_HEADER: &str = "Validation failed:";

/// Per-file errors from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    /// An empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error against `file`.
    pub fn add(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.errors
            .entry(file.into())
            .or_default()
            .push(error.into());
    }

    /// Record a validator's error list against `file`. An empty list leaves
    /// the report unchanged.
    pub fn extend(&mut self, file: impl Into<String>, errors: Vec<String>) {
        if errors.is_empty() {
            return;
        }
        self.errors.entry(file.into()).or_default().extend(errors);
    }

    /// True when no file has errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of files with at least one error.
    pub fn file_count(&self) -> usize {
        self.errors.len()
    }

    /// Total number of errors across all files.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Errors recorded for `file`, empty if none.
    pub fn errors_for(&self, file: &str) -> &[String] {
        self.errors.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All errors, keyed by file in sorted order.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// The human-readable report, newline-terminated.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "{SUCCESS_MESSAGE}");
        }
        writeln!(f, "{FAILURE_HEADER}")?;
        writeln!(f)?;
        for (file, errors) in &self.errors {
            writeln!(f, "{file}:")?;
            for error in errors {
                writeln!(f, "  - {error}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
