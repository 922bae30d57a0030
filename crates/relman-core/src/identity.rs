//! # Naming Rules and Identifier Newtypes
//!
//! App and environment names are restricted to `^[a-z]+$`. The newtypes
//! here can only be constructed from names that pass [`validate_name`], so
//! an `AppName` in hand is always safe to splice into a filename.
//!
//! File naming conventions:
//!
//! - manifests: `{app}--{environment}.yml`
//! - notes:     `{app}--{version}.yml`

use serde::{Deserialize, Serialize};

use crate::error::RelmanError;

/// Locale every notes file must provide; used when a client's locale has
/// no dedicated entry.
pub const FALLBACK_LOCALE: &str = "en-en";

/// Separator between the two components of corpus filenames.
pub const FILENAME_SEPARATOR: &str = "--";

/// Extension shared by every corpus document.
pub const YAML_EXTENSION: &str = ".yml";

/// Returns true iff `name` is non-empty and consists of ASCII lowercase
/// letters only.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// An application name from `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AppName(String);

/// An environment name, scoped to one application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnvironmentName(String);

impl AppName {
    /// Validate and wrap an application name.
    pub fn new(name: impl Into<String>) -> Result<Self, RelmanError> {
        let name = name.into();
        if validate_name(&name) {
            Ok(Self(name))
        } else {
            Err(RelmanError::InvalidFormat {
                kind: "app name",
                input: name,
            })
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EnvironmentName {
    /// Validate and wrap an environment name.
    pub fn new(name: impl Into<String>) -> Result<Self, RelmanError> {
        let name = name.into();
        if validate_name(&name) {
            Ok(Self(name))
        } else {
            Err(RelmanError::InvalidFormat {
                kind: "environment name",
                input: name,
            })
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Manifest filename for an (app, environment) pair.
pub fn manifest_filename(app: &AppName, environment: &EnvironmentName) -> String {
    format!("{app}{FILENAME_SEPARATOR}{environment}{YAML_EXTENSION}")
}

/// Notes filename for an (app, version) pair.
///
/// Takes the version as text so that names synthesized during
/// cross-validation match the manifest's spelling exactly.
pub fn notes_filename(app: &str, version: &str) -> String {
    format!("{app}{FILENAME_SEPARATOR}{version}{YAML_EXTENSION}")
}
