//! # conform-history
//!
//! Line-level history for dating files.
//!
//! [`GitRepository`] is the git2-backed implementation of the [`LineHistory`]
//! capability; [`resolve_earliest`] turns a blame into the single timestamp a
//! copyright year is derived from.

pub mod earliest;
pub mod error;
pub mod repo;

pub use earliest::{earliest_timestamp, resolve_earliest, BlameLine, LineHistory};
pub use error::HistoryError;
pub use repo::{CommitInfo, GitRepository};
