//! Error types for conform-history.

use std::path::PathBuf;

use thiserror::Error;

use conform_core::RevisionId;

/// All errors that can arise from reading repository history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// `path` is not the root of a git repository.
    #[error("cannot open repository at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// The repository has no working tree to scan.
    #[error("repository at {path} is bare")]
    Bare { path: PathBuf },

    /// HEAD is unborn or does not point at a commit.
    #[error("cannot resolve head revision: {0}")]
    Head(#[source] git2::Error),

    /// A revision id that is malformed or not a commit in this repository.
    #[error("revision {rev} is not a commit: {source}")]
    Revision {
        rev: RevisionId,
        #[source]
        source: git2::Error,
    },

    /// Line attribution failed, typically because the path is untracked at `rev`.
    #[error("cannot blame {path} at {rev}: {source}")]
    Blame {
        path: PathBuf,
        rev: RevisionId,
        #[source]
        source: git2::Error,
    },
}
