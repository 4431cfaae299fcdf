//! Earliest-date resolution over per-line attribution.

use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};

use conform_core::RevisionId;

use crate::error::HistoryError;

/// Attribution of one line of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameLine {
    /// 1-based line number in the file as of the blamed revision.
    pub line: usize,
    /// Commit time in the committer's own offset; `None` when unset.
    pub when: Option<DateTime<FixedOffset>>,
    /// Commit the line is attributed to.
    pub revision: RevisionId,
}

/// Per-line history of a path as of a revision.
pub trait LineHistory {
    fn blame(&self, rev: &RevisionId, path: &Path) -> Result<Vec<BlameLine>, HistoryError>;
}

/// The earliest set timestamp strictly before `now`.
///
/// Lines with an unset time, or a time at or after `now`, never win. `None`
/// means the file has no usable date (empty, newly added, or clock-skewed
/// history).
pub fn earliest_timestamp(
    lines: &[BlameLine],
    now: DateTime<Utc>,
) -> Option<DateTime<FixedOffset>> {
    let mut earliest: Option<DateTime<FixedOffset>> = None;
    for when in lines.iter().filter_map(|l| l.when) {
        if when >= now {
            continue;
        }
        if earliest.map_or(true, |e| when < e) {
            earliest = Some(when);
        }
    }
    earliest
}

/// Blame `path` at `rev` and reduce it to its earliest timestamp.
pub fn resolve_earliest<H: LineHistory + ?Sized>(
    history: &H,
    rev: &RevisionId,
    path: &Path,
) -> Result<Option<DateTime<FixedOffset>>, HistoryError> {
    let lines = history.blame(rev, path)?;
    let earliest = earliest_timestamp(&lines, Utc::now());
    tracing::debug!(
        path = %path.display(),
        lines = lines.len(),
        earliest = ?earliest,
        "resolved earliest commit date"
    );
    Ok(earliest)
}
