//! # Corpus Orchestration
//!
//! Validates a whole corpus tree and reconciles the files against each
//! other:
//!
//! ```text
//! config.yml
//! manifests/{app}--{environment}.yml
//! notes/{app}--{version}.yml
//! ```
//!
//! ## Run Order
//!
//! 1. Load and validate `config.yml`. Load failures abort the run; structural
//!    errors end it with a report holding only the `config.yml` entry.
//! 2. Diff the manifest listing against the filenames the config expects.
//!    Orphans and missing files are reported independently; the intersection
//!    is validated in full.
//! 3. Scan every manifest, orphans included, for the versions it declares.
//! 4. Validate each notes file whose name parses and whose app is known.
//! 5. Reconcile both directions per app: every manifest version needs a
//!    notes file, and every notes file needs a manifest version.
//!
//! A missing `notes/` directory counts as an empty one, so step 5 then
//! reports a missing notes file for every manifest version.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use relman_core::identity::FILENAME_SEPARATOR;
use relman_core::{notes_filename, ValidationClock};

use crate::config::{self, Configuration, CONFIG_FILENAME};
use crate::error::{CorpusError, CorpusResult};
use crate::manifest;
use crate::notes;
use crate::parser;
use crate::report::ValidationReport;

/// Manifest directory, relative to the corpus root.
pub const MANIFESTS_DIR: &str = "manifests";

/// Notes directory, relative to the corpus root.
pub const NOTES_DIR: &str = "notes";

/// Versions per app, as spelled in the source files.
pub type AppVersions = BTreeMap<String, BTreeSet<String>>;

/// Validates the corpus rooted at one directory.
#[derive(Debug, Clone)]
pub struct CorpusValidator {
    root: PathBuf,
    clock: ValidationClock,
}

impl CorpusValidator {
    /// A validator for `root` using the current system time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock: ValidationClock::system(),
        }
    }

    /// Replace the clock used for date rules.
    pub fn with_clock(mut self, clock: ValidationClock) -> Self {
        self.clock = clock;
        self
    }

    /// The corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate the full corpus.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError`] when `config.yml` cannot be loaded or the
    /// manifests directory is missing. Every other problem lands in the
    /// returned report.
    pub fn run(&self) -> CorpusResult<ValidationReport> {
        let _span = tracing::info_span!("corpus", root = %self.root.display()).entered();

        let config = match self.load_configuration()? {
            Ok(config) => config,
            Err(report) => return Ok(report),
        };

        let manifests_dir = self.root.join(MANIFESTS_DIR);
        let manifest_files = list_dir(&manifests_dir)?.ok_or_else(|| {
            CorpusError::ManifestsDirMissing {
                path: manifests_dir.clone(),
            }
        })?;

        let mut report = ValidationReport::new();
        self.check_manifests(&config, &manifests_dir, &manifest_files, &mut report);

        let manifest_versions = collect_manifest_versions(&manifests_dir, &manifest_files);

        let notes_dir = self.root.join(NOTES_DIR);
        let notes_files = list_dir(&notes_dir)?.unwrap_or_else(|| {
            tracing::debug!(path = %notes_dir.display(), "notes directory absent");
            BTreeSet::new()
        });
        let notes_versions = check_notes(&config, &notes_dir, &notes_files, &mut report);

        reconcile_versions(&manifest_versions, &notes_versions, &mut report);

        tracing::info!(
            manifests = manifest_files.len(),
            notes = notes_files.len(),
            failing_files = report.file_count(),
            errors = report.error_count(),
            "corpus validation finished"
        );
        Ok(report)
    }

    /// Validate one manifest or notes file.
    ///
    /// The kind is inferred from the filename: `{app}--{semver}.yml` is a
    /// notes file, anything else a manifest. Notes are checked against the
    /// apps and locales of the root's `config.yml`; no cross-file
    /// reconciliation happens.
    ///
    /// # Errors
    ///
    /// For notes files, the same `config.yml` load failures as [`Self::run`].
    pub fn validate_file(&self, path: &Path) -> CorpusResult<ValidationReport> {
        let key = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());

        let Some((app, _version)) = notes::validate_notes_filename(&key) else {
            let mut report = ValidationReport::new();
            report.extend(key, manifest::validate_manifest(path, &self.clock));
            return Ok(report);
        };

        let config = match self.load_configuration()? {
            Ok(config) => config,
            Err(report) => return Ok(report),
        };
        let mut report = ValidationReport::new();
        if !config.app_names().contains(&app) {
            report.add(key, format!("App '{app}' not defined in config.yml"));
            return Ok(report);
        }
        report.extend(key, notes::validate_notes_file(path, config.locales()));
        Ok(report)
    }

    /// Load and validate `config.yml`. The inner `Err` carries the report to
    /// return when the configuration is structurally invalid.
    fn load_configuration(&self) -> CorpusResult<Result<Configuration, ValidationReport>> {
        let doc = config::load_config(&self.root)?;
        let validation = config::validate_config(&doc);
        if validation.is_valid() {
            return Ok(Ok(validation.config));
        }
        tracing::info!(
            errors = validation.errors.len(),
            "configuration invalid; skipping manifests and notes"
        );
        let mut report = ValidationReport::new();
        report.extend(CONFIG_FILENAME, validation.errors);
        Ok(Err(report))
    }

    fn check_manifests(
        &self,
        config: &Configuration,
        manifests_dir: &Path,
        actual: &BTreeSet<String>,
        report: &mut ValidationReport,
    ) {
        let expected = config.expected_manifest_files();

        for orphan in actual.difference(&expected) {
            report.add(orphan.as_str(), "Manifest file not defined in config.yml");
        }
        for missing in expected.difference(actual) {
            report.add(
                missing.as_str(),
                "Missing manifest file (defined in config.yml but file not found)",
            );
        }
        for name in actual.intersection(&expected) {
            report.extend(
                name.as_str(),
                manifest::validate_manifest(&manifests_dir.join(name), &self.clock),
            );
        }
    }
}

/// Collect the versions declared by every manifest in `files`.
///
/// The app is the filename part before the first `--`; files without the
/// separator are skipped. Best effort: files that fail to load, or whose
/// `versions` is not a mapping, contribute nothing.
pub fn collect_manifest_versions(dir: &Path, files: &BTreeSet<String>) -> AppVersions {
    let mut versions = AppVersions::new();
    for name in files {
        let Some((app, _)) = name.split_once(FILENAME_SEPARATOR) else {
            continue;
        };
        let path = dir.join(name);
        let doc = match parser::load_yaml_document(&path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable manifest during version scan");
                continue;
            }
        };
        let keys = manifest::manifest_version_keys(&doc);
        if keys.is_empty() {
            continue;
        }
        versions.entry(app.to_string()).or_default().extend(keys);
    }
    versions
}

/// Validate the notes files and return the (app, version) pairs they cover.
fn check_notes(
    config: &Configuration,
    notes_dir: &Path,
    files: &BTreeSet<String>,
    report: &mut ValidationReport,
) -> AppVersions {
    let app_names = config.app_names();
    let mut versions = AppVersions::new();

    for name in files {
        let key = format!("{NOTES_DIR}/{name}");
        let Some((app, version)) = notes::validate_notes_filename(name) else {
            report.add(key, "Invalid filename format (expected {app}--{version}.yml)");
            continue;
        };
        if !app_names.contains(&app) {
            report.add(key, format!("App '{app}' not defined in config.yml"));
            continue;
        }
        report.extend(
            key,
            notes::validate_notes_file(&notes_dir.join(name), config.locales()),
        );
        versions.entry(app).or_default().insert(version);
    }
    versions
}

/// Report versions present on only one side of the manifest/notes pairing.
fn reconcile_versions(
    manifest_versions: &AppVersions,
    notes_versions: &AppVersions,
    report: &mut ValidationReport,
) {
    let none = BTreeSet::new();

    for (app, versions) in manifest_versions {
        let covered = notes_versions.get(app).unwrap_or(&none);
        for version in versions.difference(covered) {
            report.add(
                format!("{NOTES_DIR}/{}", notes_filename(app, version)),
                format!("Missing notes file for version {version} (referenced in manifest)"),
            );
        }
    }

    for (app, versions) in notes_versions {
        let declared = manifest_versions.get(app).unwrap_or(&none);
        for version in versions.difference(declared) {
            report.add(
                format!("{NOTES_DIR}/{}", notes_filename(app, version)),
                format!("Version {version} not referenced in any manifest file"),
            );
        }
    }
}

fn list_dir(dir: &Path) -> CorpusResult<Option<BTreeSet<String>>> {
    parser::list_yaml_files(dir).map_err(|source| CorpusError::Listing {
        path: dir.to_path_buf(),
        source,
    })
}
