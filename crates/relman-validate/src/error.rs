//! Engine error types.
//!
//! Two tiers. [`DocumentError`] is a per-file load failure; validators turn
//! it into a single report entry and move on. [`CorpusError`] is fatal: the
//! corpus cannot be validated at all, so the run aborts before producing a
//! report.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one YAML document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file exists but is not valid YAML.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Any other I/O failure while reading.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocumentError {
    /// The entry recorded in a file's error list for this failure.
    pub fn report_message(&self) -> String {
        match self {
            Self::YamlParse { source, .. } => format!("YAML syntax error: {source}"),
            Self::FileNotFound { .. } => format!("Error reading file: {self}"),
            Self::Io { source, .. } => format!("Error reading file: {source}"),
        }
    }
}

/// Result type alias for document loading.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Conditions that abort a corpus run.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// `config.yml` is absent from the corpus root.
    #[error("config.yml not found")]
    ConfigNotFound { path: PathBuf },

    /// `config.yml` is not valid YAML.
    #[error("YAML syntax error in config.yml: {source}")]
    ConfigSyntax { source: serde_yaml::Error },

    /// `config.yml` exists but could not be read.
    #[error("Error reading config.yml: {source}")]
    ConfigRead { source: std::io::Error },

    /// The corpus root has no `manifests/` directory.
    #[error("manifests directory not found")]
    ManifestsDirMissing { path: PathBuf },

    /// A corpus directory exists but could not be listed.
    #[error("failed to list {path}: {source}")]
    Listing {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<DocumentError> for CorpusError {
    /// Lift a `config.yml` load failure into the fatal tier.
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::FileNotFound { path } => Self::ConfigNotFound { path },
            DocumentError::YamlParse { source, .. } => Self::ConfigSyntax { source },
            DocumentError::Io { source, .. } => Self::ConfigRead { source },
        }
    }
}

/// Result type alias for corpus runs.
pub type CorpusResult<T> = Result<T, CorpusError>;
