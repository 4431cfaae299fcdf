//! Error types for conform-fixer.

use std::path::PathBuf;

use thiserror::Error;

use conform_detector::SniffError;
use conform_history::HistoryError;
use conform_renderer::RenderError;

/// Everything that can go wrong while remediating a single file.
#[derive(Debug, Error)]
pub enum RemediateError {
    /// The file prefix could not be read.
    #[error("sniff failed: {0}")]
    Sniff(#[from] SniffError),

    /// The file does not live under the repository root, so it cannot be blamed.
    #[error("{path} is outside repository root {root}")]
    OutsideRepository { path: PathBuf, root: PathBuf },

    /// Line attribution failed.
    #[error("history error: {0}")]
    History(#[from] HistoryError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a job produced a failed outcome.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Remediate(#[from] RemediateError),

    /// The job panicked; the panic was contained to this file.
    #[error("panicked: {message}")]
    Panicked { message: String, backtrace: String },

    /// The worker thread could not build its per-thread state.
    #[error("worker initialisation failed: {0}")]
    WorkerInit(String),
}

/// Errors that stop a pipeline from starting at all.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RemediateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RemediateError {
    RemediateError::Io {
        path: path.into(),
        source,
    }
}
