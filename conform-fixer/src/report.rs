//! Outcome aggregation and the live progress line.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::error::JobError;
use crate::pipeline::{Outcome, OutcomeStatus};

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Aggregate counters for one run.
///
/// `total == fixed + compliant + errored`; `flagged` counts the subset of
/// `compliant` files that lack a header but were left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: u64,
    pub fixed: u64,
    pub compliant: u64,
    pub errored: u64,
    pub flagged: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match &outcome.status {
            OutcomeStatus::Rewritten => self.fixed += 1,
            OutcomeStatus::NoActionNeeded(reason) => {
                self.compliant += 1;
                if reason.is_missing_header() {
                    self.flagged += 1;
                }
            }
            OutcomeStatus::Failed(_) => self.errored += 1,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {}:: AddedLicenses: {} AlreadyHaveLicenses: {} Errors: {}",
            self.total, self.fixed, self.compliant, self.errored
        )
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Folds outcomes into a [`Tally`], redrawing the progress line after each.
pub struct Reporter<W: Write> {
    out: W,
    tally: Tally,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            out,
            tally: Tally::default(),
        }
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Record one outcome and redraw the progress line.
    pub fn observe(&mut self, outcome: &Outcome) -> io::Result<()> {
        if let OutcomeStatus::Failed(err) = &outcome.status {
            log_failure(outcome, err);
        }
        self.tally.record(outcome);
        write!(self.out, "{}\r", self.tally)?;
        self.out.flush()
    }

    /// Drain `outcomes` to the end and return the final tally.
    pub fn consume(mut self, outcomes: impl IntoIterator<Item = Outcome>) -> io::Result<Tally> {
        for outcome in outcomes {
            self.observe(&outcome)?;
        }
        Ok(self.tally)
    }
}

fn log_failure(outcome: &Outcome, err: &JobError) {
    let path = outcome.path.display();
    match err {
        JobError::Panicked { message, backtrace } => {
            tracing::error!("{path}: panicked: {message}\n{backtrace}");
        }
        other => tracing::error!("{path}: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remediate::SkipReason;
    use std::path::PathBuf;

    fn outcome(status: OutcomeStatus) -> Outcome {
        Outcome {
            path: PathBuf::from("/repo/a.go"),
            status,
        }
    }

    #[test]
    fn each_outcome_lands_in_one_bucket() {
        let mut t = Tally::default();
        t.record(&outcome(OutcomeStatus::Rewritten));
        t.record(&outcome(OutcomeStatus::NoActionNeeded(SkipReason::AlreadyLicensed)));
        t.record(&outcome(OutcomeStatus::NoActionNeeded(SkipReason::ReportOnly)));
        t.record(&outcome(OutcomeStatus::NoActionNeeded(SkipReason::NoHistory)));
        t.record(&outcome(OutcomeStatus::Failed(JobError::WorkerInit("x".into()))));

        assert_eq!(
            t,
            Tally {
                total: 5,
                fixed: 1,
                compliant: 3,
                errored: 1,
                flagged: 2,
            }
        );
        assert_eq!(t.total, t.fixed + t.compliant + t.errored);
    }

    #[test]
    fn progress_line_format() {
        let t = Tally {
            total: 10,
            fixed: 3,
            compliant: 6,
            errored: 1,
            flagged: 0,
        };
        assert_eq!(
            t.to_string(),
            "Total: 10:: AddedLicenses: 3 AlreadyHaveLicenses: 6 Errors: 1"
        );
    }

    #[test]
    fn reporter_redraws_with_carriage_return() {
        let mut buf = Vec::new();
        let tally = Reporter::new(&mut buf)
            .consume(vec![
                outcome(OutcomeStatus::Rewritten),
                outcome(OutcomeStatus::NoActionNeeded(SkipReason::Generated)),
            ])
            .unwrap();

        assert_eq!(tally.total, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Total: 1:: AddedLicenses: 1 AlreadyHaveLicenses: 0 Errors: 0\r\
             Total: 2:: AddedLicenses: 1 AlreadyHaveLicenses: 1 Errors: 0\r"
        );
    }
}
