//! git2-backed repository capability: open, head, commit lookup, blame.
//!
//! A [`GitRepository`] wraps a libgit2 handle, which is `Send` but not `Sync`:
//! open one per worker thread rather than sharing it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use git2::{BlameOptions, Oid, Repository};

use conform_core::RevisionId;

use crate::earliest::{BlameLine, LineHistory};
use crate::error::HistoryError;

/// Summary of a resolved commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: RevisionId,
    pub when: Option<DateTime<FixedOffset>>,
    pub summary: String,
}

/// An opened, non-bare git repository.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Open the repository whose working tree is rooted at `path`.
    ///
    /// Parent directories are not searched; `path` must be the repository root.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let repo = Repository::open(path).map_err(|source| HistoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| HistoryError::Bare {
                path: path.to_path_buf(),
            })?;
        Ok(GitRepository { repo, workdir })
    }

    /// Working-tree root as reported by libgit2.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The commit currently checked out.
    pub fn head(&self) -> Result<RevisionId, HistoryError> {
        let commit = self
            .repo
            .head()
            .and_then(|r| r.peel_to_commit())
            .map_err(HistoryError::Head)?;
        Ok(RevisionId(commit.id().to_string()))
    }

    /// Look up `rev`, failing unless it names a commit.
    pub fn commit(&self, rev: &RevisionId) -> Result<CommitInfo, HistoryError> {
        let commit = self.find_commit(rev)?;
        Ok(CommitInfo {
            id: RevisionId(commit.id().to_string()),
            when: to_datetime(commit.time()),
            summary: commit.summary().unwrap_or_default().to_string(),
        })
    }

    fn find_commit(&self, rev: &RevisionId) -> Result<git2::Commit<'_>, HistoryError> {
        let revision_err = |source| HistoryError::Revision {
            rev: rev.clone(),
            source,
        };
        let oid = Oid::from_str(&rev.0).map_err(revision_err)?;
        self.repo.find_commit(oid).map_err(revision_err)
    }
}

impl LineHistory for GitRepository {
    fn blame(&self, rev: &RevisionId, path: &Path) -> Result<Vec<BlameLine>, HistoryError> {
        let commit = self.find_commit(rev)?;
        let mut opts = BlameOptions::new();
        opts.newest_commit(commit.id());

        let blame = self
            .repo
            .blame_file(path, Some(&mut opts))
            .map_err(|source| HistoryError::Blame {
                path: path.to_path_buf(),
                rev: rev.clone(),
                source,
            })?;

        let mut lines = Vec::new();
        for hunk in blame.iter() {
            let when = to_datetime(hunk.final_signature().when());
            let revision = RevisionId(hunk.final_commit_id().to_string());
            let start = hunk.final_start_line();
            for offset in 0..hunk.lines_in_hunk() {
                lines.push(BlameLine {
                    line: start + offset,
                    when,
                    revision: revision.clone(),
                });
            }
        }
        Ok(lines)
    }
}

/// libgit2 reports a missing date as second 0.
fn to_datetime(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    if time.seconds() == 0 {
        return None;
    }
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn zero_time_is_unset() {
        assert_eq!(to_datetime(git2::Time::new(0, 0)), None);
    }

    #[test]
    fn offset_is_preserved() {
        // 2015-12-31T23:30:00Z is already 2016 at +01:00.
        let dt = to_datetime(git2::Time::new(1_451_604_600, 60)).unwrap();
        assert_eq!(dt.year(), 2016);
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.offset().local_minus_utc(), 3600);
    }
}
