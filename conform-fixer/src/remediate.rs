//! Per-file remediation.
//!
//! ## `remediate`: 8-step protocol
//!
//! 1. Sniff the first 624 bytes (I/O failure → error).
//! 2. License or generated marker present → no action, no history lookup.
//! 3. Resolve the earliest commit date of the path at the head revision.
//! 4. Report only, or no usable date → no action.
//! 5. Render the header for that year and the configured holder.
//! 6. Concatenate header ‖ sniffed prefix ‖ rest of the open handle.
//! 7. Write to `<path>.conform.tmp` with the original permissions, then rename
//!    over the original.
//! 8. Report the file as rewritten.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Serialize;

use conform_core::{CopyrightInfo, WorkItem};
use conform_detector::{contains_generated_marker, contains_license_marker, sniff, Sniff};
use conform_history::{resolve_earliest, LineHistory};
use conform_renderer::HeaderRenderer;

use crate::error::{io_err, RemediateError};
use crate::pipeline::Worker;

// ---------------------------------------------------------------------------
// Disposition
// ---------------------------------------------------------------------------

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The prefix already carries a license marker.
    AlreadyLicensed,
    /// The prefix carries a do-not-edit marker.
    Generated,
    /// Header missing, but fix mode is off.
    ReportOnly,
    /// Header missing, but no commit date is available to stamp.
    NoHistory,
}

impl SkipReason {
    /// `true` when the file lacks a header and was only flagged.
    pub fn is_missing_header(&self) -> bool {
        matches!(self, SkipReason::ReportOnly | SkipReason::NoHistory)
    }
}

/// Successful result of remediating one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// A header was prepended and the file rewritten.
    Rewritten,
    /// The file was left exactly as it was.
    NoActionNeeded(SkipReason),
}

// ---------------------------------------------------------------------------
// remediate
// ---------------------------------------------------------------------------

/// Run the remediation protocol for one file.
pub fn remediate<H: LineHistory + ?Sized>(
    item: &WorkItem,
    history: &H,
    renderer: &HeaderRenderer,
) -> Result<Disposition, RemediateError> {
    let path = item.path.as_path();

    // Step 1: the handle closes on every early return below.
    let Sniff {
        prefix,
        file,
        licensed,
        generated,
    } = sniff(path, contains_license_marker, contains_generated_marker)?;

    // Step 2.
    if licensed {
        tracing::debug!("licensed: {}", path.display());
        return Ok(Disposition::NoActionNeeded(SkipReason::AlreadyLicensed));
    }
    if generated {
        tracing::debug!("generated: {}", path.display());
        return Ok(Disposition::NoActionNeeded(SkipReason::Generated));
    }

    // Step 3.
    let rel = item
        .relative_path()
        .ok_or_else(|| RemediateError::OutsideRepository {
            path: path.to_path_buf(),
            root: item.ctx.repo_root.clone(),
        })?;
    let earliest = resolve_earliest(history, &item.ctx.head, rel)?;

    // Step 4.
    if !item.ctx.fix {
        tracing::debug!("missing header (report only): {}", path.display());
        return Ok(Disposition::NoActionNeeded(SkipReason::ReportOnly));
    }
    let Some(earliest) = earliest else {
        tracing::debug!("missing header, no dated history: {}", path.display());
        return Ok(Disposition::NoActionNeeded(SkipReason::NoHistory));
    };

    // Step 5.
    let info = CopyrightInfo {
        year: earliest.year(),
        holder: item.ctx.holder.clone(),
    };
    let header = renderer.render(&info, item.ctx.template)?;

    // Step 6.
    let mut content = Vec::with_capacity(header.len() + prefix.len());
    header
        .as_slice()
        .chain(prefix.as_slice())
        .chain(file)
        .read_to_end(&mut content)
        .map_err(|e| io_err(path, e))?;

    // Step 7.
    replace_contents(path, &content)?;

    tracing::debug!(year = info.year, "added header: {}", path.display());
    Ok(Disposition::Rewritten)
}

// ---------------------------------------------------------------------------
// replace_contents
// ---------------------------------------------------------------------------

/// Replace the contents of `path`, keeping its permissions.
///
/// The new bytes go to `<path>.conform.tmp` first and are renamed into place,
/// so an interrupted run leaves either the old or the new file, never a torn one.
pub(crate) fn replace_contents(path: &Path, content: &[u8]) -> Result<(), RemediateError> {
    let tmp = PathBuf::from(format!("{}.conform.tmp", path.display()));
    replace_contents_with_tmp(path, content, &tmp)
}

fn replace_contents_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), RemediateError> {
    let perms = fs::metadata(path)
        .map_err(|e| io_err(path, e))?
        .permissions();

    let staged = fs::write(tmp, content)
        .and_then(|()| fs::set_permissions(tmp, perms))
        .and_then(|()| fs::rename(tmp, path));
    if let Err(e) = staged {
        let _ = fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Remediator
// ---------------------------------------------------------------------------

/// Pipeline worker that owns one history handle and one renderer.
pub struct Remediator<H> {
    history: H,
    renderer: HeaderRenderer,
}

impl<H: LineHistory> Remediator<H> {
    pub fn new(history: H) -> Result<Self, RemediateError> {
        Ok(Remediator {
            history,
            renderer: HeaderRenderer::new()?,
        })
    }
}

impl<H: LineHistory> Worker for Remediator<H> {
    fn process(&mut self, item: &WorkItem) -> Result<Disposition, RemediateError> {
        remediate(item, &self.history, &self.renderer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
