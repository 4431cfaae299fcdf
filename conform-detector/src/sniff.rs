//! Bounded-prefix header sniffing.
//!
//! Only the first [`PREFIX_LEN`] bytes of a file are inspected. The open handle
//! is handed back so a caller that decides to rewrite the file can stream the
//! remainder without reopening it.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use memchr::memmem;
use thiserror::Error;

/// Number of leading bytes inspected for header markers.
pub const PREFIX_LEN: usize = 624;

const APACHE_LICENSE_URL: &[u8] = b"http://www.apache.org/licenses/LICENSE-2.0";
const ALL_RIGHTS_RESERVED: &[u8] = b"all rights reserved";
const DO_NOT_EDIT: &[u8] = b"DO NOT EDIT!";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A classified file prefix plus the handle it was read from.
#[derive(Debug)]
pub struct Sniff {
    /// Exactly the bytes read: between 1 and [`PREFIX_LEN`].
    pub prefix: Vec<u8>,
    /// Open handle positioned immediately after `prefix`.
    pub file: File,
    /// Prefix carries a license marker.
    pub licensed: bool,
    /// Prefix carries an auto-generated marker.
    pub generated: bool,
}

/// Errors from sniffing a file prefix.
#[derive(Debug, Error)]
pub enum SniffError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is empty")]
    Empty { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read up to [`PREFIX_LEN`] bytes of `path` and classify them.
///
/// A file shorter than the prefix is fine as long as at least one byte is
/// read; an empty file is an error.
pub fn sniff<L, G>(path: &Path, has_license: L, is_generated: G) -> Result<Sniff, SniffError>
where
    L: Fn(&[u8]) -> bool,
    G: Fn(&[u8]) -> bool,
{
    let mut file = File::open(path).map_err(|source| SniffError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut prefix = Vec::with_capacity(PREFIX_LEN);
    (&mut file)
        .take(PREFIX_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(|source| SniffError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if prefix.is_empty() {
        return Err(SniffError::Empty {
            path: path.to_path_buf(),
        });
    }

    let licensed = has_license(&prefix);
    let generated = is_generated(&prefix);
    Ok(Sniff {
        prefix,
        file,
        licensed,
        generated,
    })
}

/// Case-insensitive "all rights reserved", or the exact Apache 2.0 license URL.
pub fn contains_license_marker(prefix: &[u8]) -> bool {
    let lower = prefix.to_ascii_lowercase();
    memmem::find(&lower, ALL_RIGHTS_RESERVED).is_some()
        || memmem::find(prefix, APACHE_LICENSE_URL).is_some()
}

/// Exact `DO NOT EDIT!` as emitted by code generators.
pub fn contains_generated_marker(prefix: &[u8]) -> bool {
    memmem::find(prefix, DO_NOT_EDIT).is_some()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
