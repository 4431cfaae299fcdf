//! Candidate discovery for `conform-detector`.
//!
//! [`walk::source_files`] enumerates candidate files under a root, and
//! [`sniff::sniff`] classifies a file from its first [`sniff::PREFIX_LEN`]
//! bytes without reading the rest.

pub mod sniff;
pub mod walk;

pub use sniff::{
    contains_generated_marker, contains_license_marker, sniff, Sniff, SniffError, PREFIX_LEN,
};
pub use walk::{source_files, FileFilter};
