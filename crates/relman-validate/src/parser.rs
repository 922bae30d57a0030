//! Shared YAML loading and value inspection.
//!
//! Every validator reads documents through [`load_yaml_document`] so that
//! load failures are classified the same way everywhere. Documents stay as
//! untyped `serde_yaml::Value` trees: the validators need to report on
//! malformed shapes, which a typed deserialize would reject wholesale.
//!
//! `serde_yaml` mappings preserve insertion order. The manifest ordering
//! check depends on this.

use std::collections::BTreeSet;
use std::path::Path;

use relman_core::Timestamp;
use serde_yaml::Value;

use crate::error::{DocumentError, DocumentResult};

/// Extension of every corpus document.
pub const DOCUMENT_EXTENSION: &str = "yml";

/// Load a YAML file as an untyped value tree.
///
/// An empty or whitespace-only file loads as `Value::Null`.
pub fn load_yaml_document(path: &Path) -> DocumentResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocumentError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DocumentError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&content).map_err(|e| DocumentError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Names of the `*.yml` files directly inside `dir`.
///
/// Returns `Ok(None)` when `dir` does not exist, which callers must keep
/// distinct from an existing but empty directory. Symlinks to files are
/// listed; subdirectories and non-UTF-8 names are ignored.
pub fn list_yaml_files(dir: &Path) -> std::io::Result<Option<BTreeSet<String>>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks; dangling links are skipped.
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_string());
        }
    }
    Ok(Some(names))
}

/// YAML type name used in "must be an object, not {type}" reports.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(tagged) => type_name(&tagged.value),
    }
}

/// Render a key or scalar for inclusion in an error message.
///
/// Strings are rendered bare; other scalars use their YAML spelling, so an
/// unquoted `1.0` key reads back as `1.0`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => display_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_else(|_| type_name(value).to_string()),
    }
}

/// True for the values YAML authors use to mean "nothing here": null and
/// empty strings, lists or mappings.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Tagged(_) => false,
    }
}

/// Interpret a `released_at` value as a UTC timestamp.
///
/// Accepts an ISO 8601 string, or a scalar explicitly tagged
/// `!!timestamp`.
pub fn timestamp_from_value(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => Timestamp::parse_iso8601(s).ok(),
        Value::Tagged(tagged) if is_timestamp_tag(&tagged.tag.to_string()) => {
            match &tagged.value {
                Value::String(s) => Timestamp::parse_iso8601(s).ok(),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Returns true iff `value` is an acceptable `released_at`.
pub fn validate_iso8601_value(value: &Value) -> bool {
    timestamp_from_value(value).is_some()
}

fn is_timestamp_tag(tag: &str) -> bool {
    tag.trim_start_matches('!') == "timestamp" || tag.ends_with(":timestamp")
}
