//! conform core library: domain types and run settings.
//!
//! - [`types`]: newtypes, [`WorkItem`] and the values it carries
//! - [`config`]: optional `.conform.yaml` settings
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::Settings;
pub use error::ConfigError;
pub use types::{CopyrightInfo, HeaderTemplate, RevisionId, RunContext, WorkItem};
