//! Filesystem enumeration of candidate source files.

use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

use conform_core::Settings;
use walkdir::WalkDir;

// ---------------------------------------------------------------------------
// FileFilter
// ---------------------------------------------------------------------------

/// Predicate selecting which regular files are candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// File-name suffixes that qualify (e.g. `".go"`).
    pub extensions: Vec<String>,
    /// Directory names excluded wherever they appear below the walk root.
    pub exclude_dirs: Vec<String>,
    /// Exact file names that never qualify.
    pub exclude_files: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter::from_settings(&Settings::default())
    }
}

impl FileFilter {
    pub fn from_settings(settings: &Settings) -> Self {
        FileFilter {
            extensions: settings.extensions.clone(),
            exclude_dirs: settings.exclude_dirs.clone(),
            exclude_files: settings.exclude_files.clone(),
        }
    }

    /// `true` if `path` is a regular file this run should inspect.
    pub fn matches(&self, path: &Path, meta: &Metadata) -> bool {
        if !meta.is_file() {
            return false;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            return false;
        }
        if self.exclude_files.iter().any(|f| f == name) {
            return false;
        }
        !self.in_excluded_dir(path)
    }

    /// `true` if any directory component of `path` is excluded.
    pub fn in_excluded_dir(&self, path: &Path) -> bool {
        let parent = path.parent().unwrap_or(Path::new(""));
        parent.components().any(|c| match c {
            Component::Normal(seg) => self
                .exclude_dirs
                .iter()
                .any(|d| seg.to_str() == Some(d.as_str())),
            _ => false,
        })
    }
}

// ---------------------------------------------------------------------------
// source_files
// ---------------------------------------------------------------------------

/// Lazily walk `root`, yielding every path for which `predicate(path, metadata)` holds.
///
/// `predicate` sees the path relative to `root`, so directories above the
/// root never count toward exclusions; yielded paths keep the `root` prefix.
/// Entries the walker cannot read (permission denied, vanished mid-walk, …)
/// are skipped rather than aborting the walk. `.git` is never descended into.
pub fn source_files<P>(root: &Path, predicate: P) -> impl Iterator<Item = PathBuf>
where
    P: Fn(&Path, &Metadata) -> bool,
{
    let base = root.to_path_buf();
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == ".git"))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable walk entry");
                None
            }
        })
        .filter_map(move |entry| {
            let meta = entry.metadata().ok()?;
            let rel = entry.path().strip_prefix(&base).unwrap_or(entry.path());
            if predicate(rel, &meta) {
                Some(entry.into_path())
            } else {
                None
            }
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
