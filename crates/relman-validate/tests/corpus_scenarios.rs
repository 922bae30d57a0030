//! End-to-end corpus scenarios.
//!
//! Each test builds a corpus tree in a temp directory, runs the full
//! orchestrator against a pinned clock, and checks the resulting report.

use std::path::Path;

use chrono::{TimeZone, Utc};
use relman_core::{Timestamp, ValidationClock};
use relman_validate::{CorpusError, CorpusValidator, ValidationReport};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CONFIG: &str = "\
apps:
  - name: pos
    environments: [live, staging]
locales: [en-en, de-de]
";

const MANIFEST: &str = "\
versions:
  1.0.0:
    released_at: 2026-01-10T09:00:00Z
    matchers:
      - matcher_type: default
        severity: green
      - matcher_type: country
        matcher_value: DE
        severity: yellow
  1.1.0:
    released_at: 2026-03-01T09:00:00Z
    notes: checkout fixes
    matchers:
      - matcher_type: default
        severity: green
";

const NOTES: &str = "\
locales:
  - name: en-en
    notes: Faster checkout.
  - name: de-de
    notes: Schnellerer Checkout.
";

struct Corpus {
    dir: TempDir,
}

impl Corpus {
    /// A complete, valid corpus.
    fn valid() -> Self {
        let corpus = Self::empty();
        corpus.write("config.yml", CONFIG);
        corpus.write("manifests/pos--live.yml", MANIFEST);
        corpus.write("manifests/pos--staging.yml", MANIFEST);
        corpus.write("notes/pos--1.0.0.yml", NOTES);
        corpus.write("notes/pos--1.1.0.yml", NOTES);
        corpus
    }

    fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn remove(&self, rel: &str) {
        std::fs::remove_file(self.root().join(rel)).unwrap();
    }

    fn validator(&self) -> CorpusValidator {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        CorpusValidator::new(self.root()).with_clock(ValidationClock::fixed(Timestamp::from_utc(now)))
    }

    fn run(&self) -> ValidationReport {
        self.validator().run().unwrap()
    }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn valid_corpus_passes() {
    let report = Corpus::valid().run();
    assert!(report.is_valid(), "{report}");
    assert_eq!(report.render_text(), "All manifest and notes files are valid\n");
}

#[test]
fn repeated_runs_are_identical() {
    let corpus = Corpus::valid();
    corpus.write("manifests/pos--live.yml", "versions:\n  b.a.d: 1\n");
    assert_eq!(corpus.run(), corpus.run());
}

#[cfg(unix)]
#[test]
fn symlinked_manifest_counts_as_present() {
    let corpus = Corpus::valid();
    corpus.write("shared/pos.yml", MANIFEST);
    corpus.remove("manifests/pos--live.yml");
    std::os::unix::fs::symlink(
        corpus.root().join("shared/pos.yml"),
        corpus.root().join("manifests/pos--live.yml"),
    )
    .unwrap();
    corpus.remove("manifests/pos--staging.yml");
    std::os::unix::fs::symlink(
        corpus.root().join("shared/pos.yml"),
        corpus.root().join("manifests/pos--staging.yml"),
    )
    .unwrap();

    let report = corpus.run();
    assert!(report.is_valid(), "{report}");
}

// ---------------------------------------------------------------------------
// Fatal conditions
// ---------------------------------------------------------------------------

#[test]
fn missing_config_aborts() {
    let corpus = Corpus::empty();
    let err = corpus.validator().run().unwrap_err();
    assert_eq!(err.to_string(), "config.yml not found");
}

#[test]
fn config_syntax_error_aborts() {
    let corpus = Corpus::valid();
    corpus.write("config.yml", "apps: [\n");
    let err = corpus.validator().run().unwrap_err();
    assert!(matches!(err, CorpusError::ConfigSyntax { .. }));
    assert!(err.to_string().starts_with("YAML syntax error in config.yml: "));
}

#[test]
fn missing_manifests_dir_aborts() {
    let corpus = Corpus::empty();
    corpus.write("config.yml", CONFIG);
    let err = corpus.validator().run().unwrap_err();
    assert_eq!(err.to_string(), "manifests directory not found");
}

#[test]
fn structural_config_errors_are_the_only_report_entry() {
    let corpus = Corpus::valid();
    corpus.write(
        "config.yml",
        "apps:\n  - name: pos\n    environments: [live, staging]\nlocales: [de-de]\n",
    );
    corpus.write("manifests/orphan--live.yml", MANIFEST);
    let report = corpus.run();
    assert_eq!(report.file_count(), 1);
    assert_eq!(
        report.errors_for("config.yml"),
        ["config.yml: missing required locale 'en-en'"]
    );
}

// ---------------------------------------------------------------------------
// Manifest reconciliation
// ---------------------------------------------------------------------------

#[test]
fn orphan_manifest_reported() {
    let corpus = Corpus::valid();
    corpus.write("manifests/unknown--app.yml", MANIFEST);
    corpus.write("notes/unknown--1.0.0.yml", NOTES);
    let report = corpus.run();
    assert_eq!(
        report.errors_for("unknown--app.yml"),
        ["Manifest file not defined in config.yml"]
    );
    assert!(report.errors_for("notes/unknown--1.0.0.yml")[0].contains("not defined in config.yml"));
}

#[test]
fn missing_manifest_reported() {
    let corpus = Corpus::valid();
    corpus.remove("manifests/pos--staging.yml");
    let report = corpus.run();
    assert_eq!(
        report.errors_for("pos--staging.yml"),
        ["Missing manifest file (defined in config.yml but file not found)"]
    );
    assert_eq!(report.file_count(), 1);
}

#[test]
fn manifest_errors_keyed_by_filename() {
    let corpus = Corpus::valid();
    corpus.write(
        "manifests/pos--live.yml",
        "versions:\n  1.0.0:\n    released_at: 2026-01-10T09:00:00Z\n    matchers:\n      - matcher_type: country\n        matcher_value: XX\n        severity: red\n  1.1.0:\n    released_at: 2026-03-01T09:00:00Z\n    matchers:\n      - matcher_type: default\n        severity: green\n",
    );
    let report = corpus.run();
    assert_eq!(
        report.errors_for("pos--live.yml"),
        [
            "Version 1.0.0: invalid country code 'XX'",
            "Version 1.0.0: missing default matcher",
        ]
    );
    assert_eq!(report.file_count(), 1);
}

#[test]
fn unreadable_manifest_is_a_single_error() {
    let corpus = Corpus::valid();
    corpus.write("manifests/pos--live.yml", "versions:\n  1.0.0: [\n");
    let report = corpus.run();
    let errors = report.errors_for("pos--live.yml");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("YAML syntax error"));
    // The staging manifest still declares both versions, so the notes stay covered.
    assert_eq!(report.file_count(), 1);
}

// ---------------------------------------------------------------------------
// Notes reconciliation
// ---------------------------------------------------------------------------

#[test]
fn missing_notes_file_reported() {
    let corpus = Corpus::valid();
    corpus.remove("notes/pos--1.0.0.yml");
    let report = corpus.run();
    let errors = report.errors_for("notes/pos--1.0.0.yml");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Missing notes file for version 1.0.0"));
}

#[test]
fn unreferenced_notes_file_reported() {
    let corpus = Corpus::valid();
    corpus.write("notes/pos--9.9.9.yml", NOTES);
    let report = corpus.run();
    assert_eq!(
        report.errors_for("notes/pos--9.9.9.yml"),
        ["Version 9.9.9 not referenced in any manifest file"]
    );
}

#[test]
fn invalid_notes_filename_reported() {
    let corpus = Corpus::valid();
    corpus.write("notes/pos-1.0.0.yml", NOTES);
    corpus.write("notes/pos--latest.yml", NOTES);
    let report = corpus.run();
    for key in ["notes/pos-1.0.0.yml", "notes/pos--latest.yml"] {
        assert_eq!(
            report.errors_for(key),
            ["Invalid filename format (expected {app}--{version}.yml)"],
            "{key}"
        );
    }
}

#[test]
fn notes_content_errors_and_cross_errors_share_a_key() {
    let corpus = Corpus::valid();
    corpus.write(
        "notes/pos--2.0.0.yml",
        "locales:\n  - name: de-de\n    notes: Hallo\n",
    );
    let report = corpus.run();
    assert_eq!(
        report.errors_for("notes/pos--2.0.0.yml"),
        [
            "Missing required locale 'en-en' (needed for fallback)",
            "Version 2.0.0 not referenced in any manifest file",
        ]
    );
}

#[test]
fn notes_locales_checked_against_config() {
    let corpus = Corpus::valid();
    corpus.write(
        "notes/pos--1.1.0.yml",
        "locales:\n  - name: en-en\n    notes: Hi\n  - name: fr-fr\n    notes: Salut\n",
    );
    let report = corpus.run();
    assert_eq!(
        report.errors_for("notes/pos--1.1.0.yml"),
        ["Locale 'fr-fr' not defined in config.yml"]
    );
}

#[test]
fn absent_notes_dir_means_every_version_is_missing_notes() {
    let corpus = Corpus::valid();
    std::fs::remove_dir_all(corpus.root().join("notes")).unwrap();
    let report = corpus.run();
    assert_eq!(report.file_count(), 2);
    assert!(!report.errors_for("notes/pos--1.0.0.yml").is_empty());
    assert!(!report.errors_for("notes/pos--1.1.0.yml").is_empty());
}

#[test]
fn failure_report_text() {
    let corpus = Corpus::valid();
    corpus.remove("notes/pos--1.1.0.yml");
    corpus.write("manifests/extra--live.yml", "versions:\n  1.1.0: {}\n");
    let report = corpus.run();
    assert_eq!(
        report.render_text(),
        "Validation failed:\n\n\
         extra--live.yml:\n  - Manifest file not defined in config.yml\n\
         notes/extra--1.1.0.yml:\n  - Missing notes file for version 1.1.0 (referenced in manifest)\n\
         notes/pos--1.1.0.yml:\n  - Missing notes file for version 1.1.0 (referenced in manifest)\n"
    );
}

// ---------------------------------------------------------------------------
// Single-file mode
// ---------------------------------------------------------------------------

#[test]
fn single_manifest_file() {
    let corpus = Corpus::valid();
    corpus.write("scratch/pos--canary.yml", "versions:\n  1.0: {}\n");
    let report = corpus
        .validator()
        .validate_file(&corpus.root().join("scratch/pos--canary.yml"))
        .unwrap();
    let errors = report.errors_for("pos--canary.yml");
    assert!(errors.contains(&"Invalid semantic version format: 1.0".to_string()));
}

#[test]
fn single_notes_file_uses_config_locales() {
    let corpus = Corpus::valid();
    let validator = corpus.validator();

    let ok = validator
        .validate_file(&corpus.root().join("notes/pos--1.0.0.yml"))
        .unwrap();
    assert!(ok.is_valid(), "{ok}");

    corpus.write("scratch/pos--3.0.0.yml", "locales:\n  - name: it-it\n    notes: Ciao\n");
    let bad = validator
        .validate_file(&corpus.root().join("scratch/pos--3.0.0.yml"))
        .unwrap();
    assert_eq!(
        bad.errors_for("pos--3.0.0.yml"),
        [
            "Locale 'it-it' not defined in config.yml",
            "Missing required locale 'en-en' (needed for fallback)",
        ]
    );
}

#[test]
fn single_notes_file_for_unknown_app() {
    let corpus = Corpus::valid();
    corpus.write("scratch/kiosk--1.0.0.yml", NOTES);
    let report = corpus
        .validator()
        .validate_file(&corpus.root().join("scratch/kiosk--1.0.0.yml"))
        .unwrap();
    assert_eq!(
        report.errors_for("kiosk--1.0.0.yml"),
        ["App 'kiosk' not defined in config.yml"]
    );
}
