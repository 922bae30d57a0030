//! # relman-cli: Command-Line Interface for relman
//!
//! Provides the `relman` binary. All validation logic lives in
//! `relman-validate`; this crate parses arguments, picks the corpus root,
//! renders the report and chooses the exit code.
//!
//! ```bash
//! relman validate                            # whole corpus, found from CWD
//! relman validate --root ./release-config    # explicit corpus root
//! relman validate --format json              # machine-readable report
//! relman validate notes/pos--1.2.0.yml       # a single file
//! ```
//!
//! Exit codes: `0` when the corpus is valid, `1` on any validation failure
//! or fatal error.

pub mod validate;

use std::path::{Path, PathBuf};

use relman_validate::{CONFIG_FILENAME, MANIFESTS_DIR};

/// Resolve a path that may be relative to the corpus root.
///
/// Absolute paths are returned as-is. A relative path is taken relative to
/// `corpus_root` if that file exists, and relative to the current directory
/// otherwise.
pub fn resolve_path(path: &Path, corpus_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let root_relative = corpus_root.join(path);
    if root_relative.exists() {
        root_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from the current directory to the nearest corpus root.
pub fn resolve_corpus_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_corpus_root(&cwd)
}

/// Walk up from `start` to the first directory holding both `config.yml`
/// and a `manifests/` directory.
pub fn find_corpus_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(CONFIG_FILENAME).is_file() && dir.join(MANIFESTS_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
