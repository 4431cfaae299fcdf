//! # conform-fixer
//!
//! Header remediation over a whole repository.
//!
//! - [`remediate`]: the per-file protocol and the [`Remediator`] worker
//! - [`pipeline`]: producer + K workers over bounded channels
//! - [`fault`]: panic containment per job
//! - [`report`]: [`Tally`] and the progress-line [`Reporter`]
//! - [`scan`]: [`scan_repository`], discovery feeding the pipeline

pub mod error;
pub mod fault;
pub mod pipeline;
pub mod remediate;
pub mod report;
pub mod scan;

pub use error::{JobError, PipelineError, RemediateError};
pub use pipeline::{Outcome, OutcomeStatus, OutcomeStream, Pipeline, Worker};
pub use remediate::{remediate, Disposition, Remediator, SkipReason};
pub use report::{Reporter, Tally};
pub use scan::scan_repository;
