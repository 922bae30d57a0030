//! # Manifest Validation
//!
//! A manifest (`manifests/{app}--{environment}.yml`) maps release versions
//! to rollout rules:
//!
//! ```yaml
//! versions:
//!   1.0.0:
//!     released_at: 2026-01-10T09:00:00Z
//!     notes: optional free text
//!     matchers:
//!       - matcher_type: default
//!         severity: green
//!       - matcher_type: country
//!         matcher_value: DE
//!         severity: red
//! ```
//!
//! ## Checks
//!
//! Document level (each short-circuits with a single error): the file must
//! load, `versions` must be present and non-empty, and it must be a
//! mapping.
//!
//! Version keys: semver format, and strictly ascending numeric order among
//! the well-formed keys in file order. Malformed keys are reported and then
//! ignored for ordering.
//!
//! Entries: every version is checked independently and every violation is
//! reported. `released_at` must parse, must not lie in the future, must not
//! be older than [`MAX_RELEASE_AGE_DAYS`] and must not precede the previous
//! entry's `released_at`. Matchers are checked for shape, vocabulary,
//! value format, duplicates and the single-default rule.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use relman_core::{
    is_known_country, validate_location_hash, MatcherType, Severity, Timestamp,
    ValidationClock, Version, MAX_RELEASE_AGE_DAYS,
};
use serde_yaml::{Mapping, Value};

use crate::parser::{self, display_value, type_name};

/// Fields allowed in a version entry.
pub const VERSION_ENTRY_FIELDS: &[&str] = &["released_at", "matchers", "notes"];

/// Fields allowed in a matcher.
pub const MATCHER_FIELDS: &[&str] = &["matcher_type", "matcher_value", "severity"];

/// Validate the manifest file at `path`.
///
/// Returns the list of problems found; an empty list means the manifest is
/// valid. Never fails: load errors become the single entry of the list.
pub fn validate_manifest(path: &Path, clock: &ValidationClock) -> Vec<String> {
    tracing::debug!(path = %path.display(), "validating manifest");
    match parser::load_yaml_document(path) {
        Ok(doc) => validate_manifest_document(&doc, clock),
        Err(e) => vec![e.report_message()],
    }
}

/// Validate an already-parsed manifest document.
pub fn validate_manifest_document(doc: &Value, clock: &ValidationClock) -> Vec<String> {
    let Some(versions) = doc.get("versions") else {
        return vec!["Missing 'versions' key".to_string()];
    };
    if parser::is_blank(versions) {
        return vec!["No versions defined".to_string()];
    }
    let Some(versions) = versions.as_mapping() else {
        return vec!["'versions' must be a dictionary, not a list or other type".to_string()];
    };

    let mut errors = Vec::new();
    check_version_order(versions, &mut errors);

    let mut previous_release: Option<(String, Timestamp)> = None;
    for (key, details) in versions {
        let version = display_value(key);
        validate_version_entry(&version, details, clock, &mut previous_release, &mut errors);
    }
    errors
}

/// Version keys in file order, as written.
pub fn manifest_version_keys(doc: &Value) -> Vec<String> {
    doc.get("versions")
        .and_then(Value::as_mapping)
        .map(|versions| versions.keys().map(display_value).collect())
        .unwrap_or_default()
}

fn check_version_order(versions: &Mapping, errors: &mut Vec<String>) {
    let mut previous: Option<(Version, String)> = None;
    for key in versions.keys() {
        let text = display_value(key);
        let Ok(version) = Version::parse(&text) else {
            errors.push(format!("Invalid semantic version format: {text}"));
            continue;
        };
        if let Some((prev, prev_text)) = &previous {
            if version <= *prev {
                errors.push(format!(
                    "Versions not in ascending order: {prev_text} -> {text}"
                ));
            }
        }
        previous = Some((version, text));
    }
}

fn validate_version_entry(
    version: &str,
    details: &Value,
    clock: &ValidationClock,
    previous_release: &mut Option<(String, Timestamp)>,
    errors: &mut Vec<String>,
) {
    let Some(entry) = details.as_mapping() else {
        errors.push(format!(
            "Version {version}: version details must be an object, not {}",
            type_name(details)
        ));
        return;
    };

    let unexpected = unexpected_fields(entry, VERSION_ENTRY_FIELDS);
    if !unexpected.is_empty() {
        errors.push(format!(
            "Version {version}: unexpected fields: {}",
            unexpected.join(", ")
        ));
    }

    check_released_at(version, entry, clock, previous_release, errors);

    let Some(matchers) = entry.get("matchers") else {
        errors.push(format!("Version {version}: missing 'matchers'"));
        return;
    };
    let Some(matchers) = matchers.as_sequence() else {
        errors.push(format!("Version {version}: 'matchers' must be a list"));
        return;
    };
    check_matchers(version, matchers, errors);
}

fn check_released_at(
    version: &str,
    entry: &Mapping,
    clock: &ValidationClock,
    previous_release: &mut Option<(String, Timestamp)>,
    errors: &mut Vec<String>,
) {
    let Some(raw) = entry.get("released_at") else {
        errors.push(format!("Version {version}: missing 'released_at'"));
        return;
    };
    let Some(released_at) = parser::timestamp_from_value(raw) else {
        errors.push(format!("Version {version}: invalid ISO 8601 timestamp"));
        return;
    };

    if clock.is_future(released_at) {
        errors.push(format!(
            "Version {version}: released_at {released_at} is in the future"
        ));
    }
    if clock.is_expired(released_at) {
        errors.push(format!(
            "Version {version}: released_at {released_at} is older than {MAX_RELEASE_AGE_DAYS} days"
        ));
    }
    if let Some((prev_version, prev_released_at)) = previous_release.as_ref() {
        if released_at < *prev_released_at {
            errors.push(format!(
                "Version {version}: released_at {released_at} is earlier than previous version {prev_version} ({prev_released_at})"
            ));
        }
    }
    *previous_release = Some((version.to_string(), released_at));
}

fn check_matchers(version: &str, matchers: &[Value], errors: &mut Vec<String>) {
    let mut default_count = 0usize;
    // (type, value) -> severity label of the first occurrence
    let mut seen: BTreeMap<(MatcherType, String), String> = BTreeMap::new();

    for (index, matcher) in matchers.iter().enumerate() {
        let Some(matcher) = matcher.as_mapping() else {
            errors.push(format!(
                "Version {version}: matcher must be an object, not {}",
                type_name(matcher)
            ));
            continue;
        };

        let unexpected = unexpected_fields(matcher, MATCHER_FIELDS);
        if !unexpected.is_empty() {
            errors.push(format!(
                "Version {version}: matcher {index} has unexpected fields: {}",
                unexpected.join(", ")
            ));
        }

        let matcher_type = check_matcher_type(version, matcher.get("matcher_type"), errors);
        let value = matcher.get("matcher_value");

        match matcher_type {
            Some(MatcherType::Default) => default_count += 1,
            Some(MatcherType::Country) => match value.filter(|v| !v.is_null()) {
                None => errors.push(format!(
                    "Version {version}: invalid country code (missing matcher_value)"
                )),
                Some(raw) if raw.as_str().is_some_and(is_known_country) => {}
                Some(raw) => errors.push(format!(
                    "Version {version}: invalid country code '{}'",
                    display_value(raw)
                )),
            },
            Some(MatcherType::LocationHash) => match value.filter(|v| !v.is_null()) {
                None => errors.push(format!(
                    "Version {version}: invalid location hash format (missing matcher_value)"
                )),
                Some(raw) if raw.as_str().is_some_and(validate_location_hash) => {}
                Some(_) => errors.push(format!(
                    "Version {version}: invalid location hash format"
                )),
            },
            None => {}
        }

        let severity = matcher.get("severity");
        check_severity(version, severity, errors);

        if let (Some(kind), Some(text)) = (
            matcher_type.filter(MatcherType::takes_value),
            value.and_then(Value::as_str),
        ) {
            let label = severity
                .map(display_value)
                .unwrap_or_else(|| "(missing)".to_string());
            match seen.entry((kind, text.to_string())) {
                Entry::Vacant(slot) => {
                    slot.insert(label);
                }
                Entry::Occupied(first) if *first.get() == label => errors.push(format!(
                    "Version {version}: duplicate {kind} matcher '{text}'"
                )),
                Entry::Occupied(first) => errors.push(format!(
                    "Version {version}: conflicting severities for {kind} matcher '{text}' ({} vs {label})",
                    first.get()
                )),
            }
        }
    }

    match default_count {
        0 => errors.push(format!("Version {version}: missing default matcher")),
        1 => {}
        n => errors.push(format!(
            "Version {version}: duplicate default matchers ({n} found)"
        )),
    }
}

fn check_matcher_type(
    version: &str,
    raw: Option<&Value>,
    errors: &mut Vec<String>,
) -> Option<MatcherType> {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        errors.push(format!("Version {version}: invalid matcher_type (missing)"));
        return None;
    };
    match raw.as_str().map(str::parse::<MatcherType>) {
        Some(Ok(kind)) => Some(kind),
        _ => {
            errors.push(format!(
                "Version {version}: invalid matcher_type '{}'",
                display_value(raw)
            ));
            None
        }
    }
}

fn check_severity(version: &str, raw: Option<&Value>, errors: &mut Vec<String>) {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        errors.push(format!("Version {version}: invalid severity (missing)"));
        return;
    };
    if !matches!(raw.as_str().map(str::parse::<Severity>), Some(Ok(_))) {
        errors.push(format!(
            "Version {version}: invalid severity '{}'",
            display_value(raw)
        ));
    }
}

/// Keys of `map` outside `allowed`, sorted.
fn unexpected_fields(map: &Mapping, allowed: &[&str]) -> Vec<String> {
    map.keys()
        .filter(|key| !key.as_str().is_some_and(|k| allowed.contains(&k)))
        .map(display_value)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
