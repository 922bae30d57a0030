//! # relman-validate: Release Corpus Validation Engine
//!
//! Checks a release corpus (root `config.yml`, per-environment manifests,
//! per-version notes) for structural validity and cross-file consistency.
//!
//! ## Module Overview
//!
//! - [`parser`]: YAML loading, directory listing, value inspection helpers.
//! - [`config`]: `config.yml` validation; the source of expected filenames,
//!   app names and locales.
//! - [`manifest`]: per-manifest version ordering, dates and matcher rules.
//! - [`notes`]: notes filename convention and locale entries.
//! - [`corpus`]: the orchestrator that runs everything and reconciles
//!   manifests with notes.
//! - [`report`]: [`ValidationReport`], errors keyed by file.
//!
//! ## Error Model
//!
//! Validators never fail. Each returns a `Vec<String>` of human-readable
//! problems, empty when the input is valid, and keeps going after the first
//! problem so one run surfaces everything. Only conditions that make the
//! corpus impossible to inspect (no `config.yml`, no `manifests/`) are
//! returned as [`CorpusError`].
//!
//! ## Example
//!
//! ```no_run
//! use relman_validate::CorpusValidator;
//!
//! let report = CorpusValidator::new("/srv/release-corpus").run()?;
//! print!("{report}");
//! # Ok::<(), relman_validate::CorpusError>(())
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod manifest;
pub mod notes;
pub mod parser;
pub mod report;

pub use config::{validate_config, App, ConfigValidation, Configuration, CONFIG_FILENAME};
pub use corpus::{collect_manifest_versions, CorpusValidator, MANIFESTS_DIR, NOTES_DIR};
pub use error::{CorpusError, CorpusResult, DocumentError, DocumentResult};
pub use manifest::{validate_manifest, validate_manifest_document};
pub use notes::{
    validate_notes_document, validate_notes_file, validate_notes_filename, NOTES_MAX_LENGTH,
    NOTES_MIN_LENGTH,
};
pub use parser::validate_iso8601_value;
pub use report::ValidationReport;
