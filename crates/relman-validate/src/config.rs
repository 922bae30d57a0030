//! # Root Configuration
//!
//! `config.yml` is the source of truth for which apps, environments and
//! locales exist:
//!
//! ```yaml
//! apps:
//!   - name: pos
//!     environments: [live, staging]
//! locales: [en-en, de-de]
//! ```
//!
//! [`validate_config`] accumulates every structural problem it finds and
//! returns the names that survived validation alongside the errors. Two
//! shapes short-circuit: a missing `apps` key and an `apps` value that is
//! not a non-empty list. In both cases nothing else is checked.

use std::collections::BTreeSet;
use std::path::Path;

use relman_core::{manifest_filename, AppName, EnvironmentName, FALLBACK_LOCALE};
use serde_yaml::Value;

use crate::error::CorpusResult;
use crate::parser::{self, display_value};

/// Filename of the root configuration document.
pub const CONFIG_FILENAME: &str = "config.yml";

/// Prefix of every config error entry.
const PREFIX: &str = "config.yml";

/// One application and its environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub name: AppName,
    pub environments: Vec<EnvironmentName>,
}

impl App {
    /// Manifest filenames this app expects, in declaration order.
    pub fn manifest_files(&self) -> impl Iterator<Item = String> + '_ {
        self.environments
            .iter()
            .map(move |env| manifest_filename(&self.name, env))
    }
}

/// The validated parts of `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    apps: Vec<App>,
    locales: BTreeSet<String>,
}

impl Configuration {
    /// Apps in declaration order.
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    /// Every `{app}--{environment}.yml` the manifests directory should hold.
    pub fn expected_manifest_files(&self) -> BTreeSet<String> {
        self.apps.iter().flat_map(App::manifest_files).collect()
    }

    /// Names of all valid apps.
    pub fn app_names(&self) -> BTreeSet<String> {
        self.apps
            .iter()
            .map(|app| app.name.as_str().to_string())
            .collect()
    }

    /// Locales notes files may use.
    pub fn locales(&self) -> &BTreeSet<String> {
        &self.locales
    }
}

/// Outcome of validating `config.yml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidation {
    pub config: Configuration,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    /// True when no structural errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn abort(error: String) -> Self {
        Self {
            config: Configuration::default(),
            errors: vec![error],
        }
    }
}

/// Load `config.yml` from a corpus root.
///
/// # Errors
///
/// Missing, unreadable or syntactically invalid files are fatal and map
/// onto the `Config*` variants of [`crate::CorpusError`].
pub fn load_config(root: &Path) -> CorpusResult<Value> {
    let path = root.join(CONFIG_FILENAME);
    tracing::debug!(path = %path.display(), "loading configuration");
    Ok(parser::load_yaml_document(&path)?)
}

/// Validate a parsed `config.yml` document.
pub fn validate_config(doc: &Value) -> ConfigValidation {
    let Some(apps) = doc.get("apps") else {
        return ConfigValidation::abort(format!("{PREFIX}: missing 'apps' key"));
    };
    let apps = match apps.as_sequence() {
        Some(apps) if !apps.is_empty() => apps,
        _ => {
            return ConfigValidation::abort(format!("{PREFIX}: 'apps' must be a non-empty list"))
        }
    };

    let mut errors = Vec::new();
    let mut config = Configuration::default();
    let mut seen_apps = BTreeSet::new();

    for (index, app) in apps.iter().enumerate() {
        if let Some(app) = validate_app(index, app, &mut seen_apps, &mut errors) {
            config.apps.push(app);
        }
    }

    config.locales = validate_locales(doc, &mut errors);

    ConfigValidation { config, errors }
}

fn validate_app(
    index: usize,
    app: &Value,
    seen_apps: &mut BTreeSet<String>,
    errors: &mut Vec<String>,
) -> Option<App> {
    let Some(entry) = app.as_mapping() else {
        errors.push(format!("{PREFIX}: app at index {index} must be an object"));
        return None;
    };
    let Some(raw_name) = entry.get("name") else {
        errors.push(format!("{PREFIX}: app at index {index} missing 'name'"));
        return None;
    };
    let name = match raw_name.as_str().map(AppName::new) {
        Some(Ok(name)) => name,
        _ => {
            errors.push(format!(
                "{PREFIX}: invalid app name '{}' (must be lowercase letters only)",
                display_value(raw_name)
            ));
            return None;
        }
    };
    if !seen_apps.insert(name.as_str().to_string()) {
        errors.push(format!("{PREFIX}: duplicate app name '{name}'"));
        return None;
    }

    let mut app = App {
        name,
        environments: Vec::new(),
    };

    let Some(environments) = entry.get("environments") else {
        errors.push(format!("{PREFIX}: app '{}' missing 'environments'", app.name));
        return Some(app);
    };
    let environments = match environments.as_sequence() {
        Some(envs) if !envs.is_empty() => envs,
        _ => {
            errors.push(format!(
                "{PREFIX}: app '{}' environments must be a non-empty list",
                app.name
            ));
            return Some(app);
        }
    };

    let mut seen_envs = BTreeSet::new();
    for raw_env in environments {
        let env = match raw_env.as_str().map(EnvironmentName::new) {
            Some(Ok(env)) => env,
            _ => {
                errors.push(format!(
                    "{PREFIX}: invalid environment '{}' in app '{}' (must be lowercase letters only)",
                    display_value(raw_env),
                    app.name
                ));
                continue;
            }
        };
        if !seen_envs.insert(env.as_str().to_string()) {
            errors.push(format!(
                "{PREFIX}: duplicate environment '{env}' in app '{}'",
                app.name
            ));
            continue;
        }
        app.environments.push(env);
    }

    Some(app)
}

fn validate_locales(doc: &Value, errors: &mut Vec<String>) -> BTreeSet<String> {
    let mut locales = BTreeSet::new();

    let Some(raw) = doc.get("locales") else {
        errors.push(format!("{PREFIX}: missing 'locales' key"));
        return locales;
    };
    let entries = match raw.as_sequence() {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            errors.push(format!("{PREFIX}: 'locales' must be a non-empty list"));
            return locales;
        }
    };

    for entry in entries {
        match entry.as_str() {
            Some(locale) if !locale.is_empty() => {
                if !locales.insert(locale.to_string()) {
                    errors.push(format!("{PREFIX}: duplicate locale '{locale}'"));
                }
            }
            _ => errors.push(format!(
                "{PREFIX}: invalid locale '{}' (must be a non-empty string)",
                display_value(entry)
            )),
        }
    }

    if !locales.contains(FALLBACK_LOCALE) {
        errors.push(format!(
            "{PREFIX}: missing required locale '{FALLBACK_LOCALE}'"
        ));
    }

    locales
}
