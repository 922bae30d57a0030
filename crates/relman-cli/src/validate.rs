//! # Validate Subcommand
//!
//! Runs the corpus validator and prints its report.
//!
//! Text output is byte-for-byte the format CI jobs grep for:
//!
//! ```text
//! Validation failed:
//!
//! notes/pos--1.0.0.yml:
//!   - Missing notes file for version 1.0.0 (referenced in manifest)
//! ```
//!
//! or `All manifest and notes files are valid`. Fatal conditions print a
//! single `Error: ...` line instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use relman_core::{Timestamp, ValidationClock};
use relman_validate::{CorpusValidator, ValidationReport};

/// Report rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    Text,
    /// `{"valid": bool, "errors": {file: [..]}}`.
    Json,
}

/// Arguments for the `relman validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Corpus root (holds config.yml, manifests/ and notes/). Defaults to the
    /// nearest ancestor of the current directory that looks like one.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Evaluate date rules as of this instant (RFC 3339) instead of now.
    #[arg(long, value_name = "TIMESTAMP")]
    pub as_of: Option<String>,

    /// Validate only this manifest or notes file.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation failure or a fatal
/// corpus error.
pub fn run_validate(args: &ValidateArgs, corpus_root: &Path) -> Result<u8> {
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| corpus_root.to_path_buf());
    tracing::debug!(root = %root.display(), "resolved corpus root");

    let clock = match args.as_of.as_deref() {
        Some(as_of) => ValidationClock::fixed(
            Timestamp::parse_iso8601(as_of)
                .with_context(|| format!("invalid --as-of value {as_of:?}"))?,
        ),
        None => ValidationClock::system(),
    };
    tracing::info!(now = %clock.now(), "validation clock");

    let validator = CorpusValidator::new(&root).with_clock(clock);
    let outcome = match &args.path {
        Some(path) => validator.validate_file(&crate::resolve_path(path, &root)),
        None => validator.run(),
    };

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            println!("Error: {e}");
            return Ok(1);
        }
    };

    print!("{}", render_report(&report, args.format)?);

    if report.is_valid() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Render `report` in the requested format, newline-terminated.
pub fn render_report(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(report).context("failed to serialize report")?;
            out.push('\n');
            Ok(out)
        }
    }
}
