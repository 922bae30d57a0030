//! # Release Notes Validation
//!
//! Notes live in `notes/{app}--{version}.yml`, one file per released
//! version, with one entry per locale:
//!
//! ```yaml
//! locales:
//!   - name: en-en
//!     notes: Faster checkout.
//!   - name: de-de
//!     notes: Schnellerer Checkout.
//! ```
//!
//! Every entry must name a locale declared in `config.yml`, names must be
//! unique, and the fallback locale must be present. Note text is limited
//! to [`NOTES_MAX_LENGTH`] characters (Unicode scalar values, not bytes).

use std::collections::BTreeSet;
use std::path::Path;

use relman_core::identity::{FILENAME_SEPARATOR, YAML_EXTENSION};
use relman_core::{validate_name, validate_semver, FALLBACK_LOCALE};
use serde_yaml::Value;

use crate::parser;

/// Shortest accepted note text.
pub const NOTES_MIN_LENGTH: usize = 1;

/// Longest accepted note text.
pub const NOTES_MAX_LENGTH: usize = 500;

/// Split a notes filename into `(app, version)`.
///
/// Accepts exactly `^[a-z]+--\d+\.\d+\.\d+\.yml$`; anything else yields
/// `None`.
pub fn validate_notes_filename(filename: &str) -> Option<(String, String)> {
    let stem = filename.strip_suffix(YAML_EXTENSION)?;
    let (app, version) = stem.split_once(FILENAME_SEPARATOR)?;
    if validate_name(app) && validate_semver(version) {
        Some((app.to_string(), version.to_string()))
    } else {
        None
    }
}

/// Validate the notes file at `path` against the configured locales.
pub fn validate_notes_file(path: &Path, valid_locales: &BTreeSet<String>) -> Vec<String> {
    tracing::debug!(path = %path.display(), "validating notes");
    match parser::load_yaml_document(path) {
        Ok(doc) => validate_notes_document(&doc, valid_locales),
        Err(e) => vec![e.report_message()],
    }
}

/// Validate an already-parsed notes document.
pub fn validate_notes_document(doc: &Value, valid_locales: &BTreeSet<String>) -> Vec<String> {
    let Some(locales) = doc.get("locales") else {
        return vec!["Missing 'locales' key".to_string()];
    };
    let Some(entries) = locales.as_sequence() else {
        return vec!["'locales' must be a list".to_string()];
    };
    if entries.is_empty() {
        return vec!["At least one locale entry is required".to_string()];
    }

    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_mapping() else {
            errors.push(format!("Locale entry {index}: must be an object"));
            continue;
        };

        let name = match entry.get("name") {
            None | Some(Value::Null) => {
                errors.push(format!("Locale entry {index}: missing 'name' field"));
                continue;
            }
            Some(Value::String(name)) if name.is_empty() => {
                errors.push(format!("Locale entry {index}: 'name' cannot be empty"));
                continue;
            }
            Some(Value::String(name)) => name.as_str(),
            Some(_) => {
                errors.push(format!("Locale entry {index}: 'name' must be a string"));
                continue;
            }
        };

        if !seen.insert(name) {
            errors.push(format!("Duplicate locale entry: {name}"));
        }
        if !valid_locales.contains(name) {
            errors.push(format!("Locale '{name}' not defined in config.yml"));
        }

        match entry.get("notes") {
            None | Some(Value::Null) => {
                errors.push(format!("Locale '{name}': missing 'notes' field"));
            }
            Some(Value::String(notes)) => {
                let length = notes.chars().count();
                if length < NOTES_MIN_LENGTH {
                    errors.push(format!("Locale '{name}': notes cannot be empty"));
                } else if length > NOTES_MAX_LENGTH {
                    errors.push(format!(
                        "Locale '{name}': notes exceeds {NOTES_MAX_LENGTH} characters ({length})"
                    ));
                }
            }
            Some(_) => errors.push(format!("Locale '{name}': 'notes' must be a string")),
        }
    }

    if !seen.contains(FALLBACK_LOCALE) {
        errors.push(format!(
            "Missing required locale '{FALLBACK_LOCALE}' (needed for fallback)"
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn check(src: &str) -> Vec<String> {
        validate_notes_document(
            &serde_yaml::from_str(src).unwrap(),
            &locales(&["en-en", "de-de"]),
        )
    }

    #[test]
    fn valid_filenames() {
        assert_eq!(
            validate_notes_filename("pos--1.0.0.yml"),
            Some(("pos".to_string(), "1.0.0".to_string()))
        );
        assert_eq!(
            validate_notes_filename("kiosk--10.20.30.yml"),
            Some(("kiosk".to_string(), "10.20.30".to_string()))
        );
        assert_eq!(
            validate_notes_filename("pos--99999999999999999999.0.0.yml"),
            Some(("pos".to_string(), "99999999999999999999.0.0".to_string()))
        );
    }

    #[test]
    fn invalid_filenames() {
        for name in [
            "pos-1.0.0.yml",
            "pos--1.0.yml",
            "Pos--1.0.0.yml",
            "pos--v1.0.0.yml",
            "pos--1.0.0.yaml",
            "pos--1.0.0",
            "pos--live.yml",
            "--1.0.0.yml",
            "pos--1.0.0-beta.yml",
            "pos2--1.0.0.yml",
        ] {
            assert_eq!(validate_notes_filename(name), None, "{name}");
        }
    }

    #[test]
    fn valid_notes() {
        let errors = check(
            "locales:\n  - name: en-en\n    notes: Faster checkout.\n  - name: de-de\n    notes: Schnellerer Checkout.\n",
        );
        assert_eq!(errors, Vec::<String>::new());
    }

    #[test]
    fn document_level_errors() {
        assert_eq!(check("other: 1\n"), vec!["Missing 'locales' key"]);
        assert_eq!(
            validate_notes_document(&Value::Null, &locales(&["en-en"])),
            vec!["Missing 'locales' key"]
        );
        assert_eq!(check("locales: en-en\n"), vec!["'locales' must be a list"]);
        assert_eq!(check("locales:\n"), vec!["'locales' must be a list"]);
        assert_eq!(
            check("locales: []\n"),
            vec!["At least one locale entry is required"]
        );
    }

    #[test]
    fn entry_shape_errors() {
        let errors = check(
            "locales:\n  - en-en\n  - notes: x\n  - name: ''\n    notes: x\n  - name: 42\n    notes: x\n  - name: en-en\n    notes: ok\n",
        );
        assert_eq!(
            errors,
            vec![
                "Locale entry 0: must be an object",
                "Locale entry 1: missing 'name' field",
                "Locale entry 2: 'name' cannot be empty",
                "Locale entry 3: 'name' must be a string",
            ]
        );
    }

    #[test]
    fn duplicate_and_unknown_locales() {
        let errors = check(
            "locales:\n  - name: en-en\n    notes: a\n  - name: en-en\n    notes: b\n  - name: fr-fr\n    notes: c\n",
        );
        assert_eq!(
            errors,
            vec![
                "Duplicate locale entry: en-en",
                "Locale 'fr-fr' not defined in config.yml",
            ]
        );
    }

    #[test]
    fn notes_field_errors() {
        let errors = check(
            "locales:\n  - name: en-en\n  - name: de-de\n    notes: ''\n",
        );
        assert_eq!(
            errors,
            vec![
                "Locale 'en-en': missing 'notes' field",
                "Locale 'de-de': notes cannot be empty",
            ]
        );
        let errors = check("locales:\n  - name: en-en\n    notes: [a, b]\n");
        assert_eq!(errors, vec!["Locale 'en-en': 'notes' must be a string"]);
    }

    #[test]
    fn notes_length_limit() {
        let at_limit = format!("locales:\n  - name: en-en\n    notes: {}\n", "a".repeat(500));
        assert_eq!(check(&at_limit), Vec::<String>::new());

        let over = format!("locales:\n  - name: en-en\n    notes: {}\n", "a".repeat(501));
        assert_eq!(
            check(&over),
            vec!["Locale 'en-en': notes exceeds 500 characters (501)"]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let src = format!("locales:\n  - name: en-en\n    notes: {}\n", "ü".repeat(500));
        assert_eq!(check(&src), Vec::<String>::new());
    }

    #[test]
    fn fallback_locale_required() {
        let errors = check("locales:\n  - name: de-de\n    notes: Hallo\n");
        assert_eq!(
            errors,
            vec!["Missing required locale 'en-en' (needed for fallback)"]
        );
    }

    #[test]
    fn fallback_must_also_be_configured() {
        let errors = validate_notes_document(
            &serde_yaml::from_str("locales:\n  - name: en-en\n    notes: Hi\n").unwrap(),
            &locales(&["de-de"]),
        );
        assert_eq!(errors, vec!["Locale 'en-en' not defined in config.yml"]);
    }

    #[test]
    fn unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let errors = validate_notes_file(&dir.path().join("pos--1.0.0.yml"), &locales(&["en-en"]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error reading file"));

        let bad = dir.path().join("pos--1.0.1.yml");
        std::fs::write(&bad, "locales: [\n").unwrap();
        let errors = validate_notes_file(&bad, &locales(&["en-en"]));
        assert!(errors[0].starts_with("YAML syntax error"));
    }
}
