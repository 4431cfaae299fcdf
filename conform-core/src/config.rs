//! Per-repository settings file.
//!
//! # Storage layout
//!
//! ```text
//! <repo>/
//!   .conform.yaml   (optional; every key optional)
//! ```
//!
//! Precedence is applied by the caller: command-line flag, then this file,
//! then the built-in defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::HeaderTemplate;

/// File name looked up at the repository root.
pub const SETTINGS_FILE: &str = ".conform.yaml";

pub const DEFAULT_HOLDER: &str = "ACME";
pub const DEFAULT_CONCURRENCY: usize = 6;
pub const DEFAULT_EXTENSIONS: &[&str] = &[".go"];
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["vendor"];
pub const DEFAULT_EXCLUDE_FILES: &[&str] = &["doc.go"];

/// Effective run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub holder: String,
    pub template: HeaderTemplate,
    /// Upper bound on files processed at once.
    pub concurrency: usize,
    /// File-name suffixes that select candidate files.
    pub extensions: Vec<String>,
    /// Directory names skipped anywhere in the tree.
    pub exclude_dirs: Vec<String>,
    /// Exact file names never treated as candidates.
    pub exclude_files: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            holder: DEFAULT_HOLDER.to_string(),
            template: HeaderTemplate::default(),
            concurrency: DEFAULT_CONCURRENCY,
            extensions: to_strings(DEFAULT_EXTENSIONS),
            exclude_dirs: to_strings(DEFAULT_EXCLUDE_DIRS),
            exclude_files: to_strings(DEFAULT_EXCLUDE_FILES),
        }
    }
}

impl Settings {
    /// `<repo>/.conform.yaml`. Pure, no I/O.
    pub fn path_at(repo_root: &Path) -> PathBuf {
        repo_root.join(SETTINGS_FILE)
    }

    /// Load settings for the repository at `repo_root`.
    ///
    /// A missing or empty file yields [`Settings::default`].
    /// Returns `ConfigError::Parse` (with path + line context) if malformed YAML.
    pub fn load_at(repo_root: &Path) -> Result<Settings, ConfigError> {
        let path = Self::path_at(repo_root);
        if !path.exists() {
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Settings::default());
        }
        let settings: Settings = serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        settings.validate(&path)?;
        Ok(settings)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1"));
        }
        if self.extensions.is_empty() {
            return Err(invalid("extensions must list at least one suffix"));
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            return Err(invalid("extensions must not contain empty suffixes"));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
