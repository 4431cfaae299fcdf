//! Domain types shared by every conform crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Hex object id of a commit (e.g. the repository head).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionId(pub String);

impl RevisionId {
    /// Abbreviated form used in log lines.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(10) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RevisionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RevisionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Built-in license header dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeaderTemplate {
    #[default]
    Apache2,
    Bsd,
}

impl HeaderTemplate {
    /// Map a user-supplied option to a template.
    ///
    /// Only a case-insensitive `"bsd"` selects [`HeaderTemplate::Bsd`]; every
    /// other string (including typos) falls back to Apache 2.0.
    pub fn from_option(s: &str) -> Self {
        if s.eq_ignore_ascii_case("bsd") {
            HeaderTemplate::Bsd
        } else {
            HeaderTemplate::Apache2
        }
    }

    /// Canonical option name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderTemplate::Apache2 => "apache2.0",
            HeaderTemplate::Bsd => "bsd",
        }
    }
}

impl fmt::Display for HeaderTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for HeaderTemplate {
    fn from(s: String) -> Self {
        Self::from_option(&s)
    }
}

impl From<HeaderTemplate> for String {
    fn from(t: HeaderTemplate) -> Self {
        t.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Values substituted into a header template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightInfo {
    pub year: i32,
    pub holder: String,
}

/// Run-wide attributes every [`WorkItem`] carries.
///
/// Built once per run and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Repository working-tree root; file paths are made relative to it for blame.
    pub repo_root: PathBuf,
    /// Copyright holder stamped into new headers.
    pub holder: String,
    /// `false` = report only, never write.
    pub fix: bool,
    /// Revision that history is attributed against.
    pub head: RevisionId,
    pub template: HeaderTemplate,
}

/// One candidate file awaiting processing.
///
/// The path doubles as the job key: a run never dispatches the same path twice.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub path: PathBuf,
    pub ctx: Arc<RunContext>,
}

impl WorkItem {
    pub fn new(path: impl Into<PathBuf>, ctx: Arc<RunContext>) -> Self {
        Self {
            path: path.into(),
            ctx,
        }
    }

    /// Unique identity of this job within a run.
    pub fn key(&self) -> &Path {
        &self.path
    }

    /// Path relative to the repository root, or `None` if the file lies outside it.
    pub fn relative_path(&self) -> Option<&Path> {
        self.path.strip_prefix(&self.ctx.repo_root).ok()
    }
}
