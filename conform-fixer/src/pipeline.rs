//! Bounded-concurrency remediation pipeline.
//!
//! One producer thread feeds work items into a bounded channel of capacity K;
//! K worker threads drain it, each owning the state built by `make_worker`.
//! Every accepted item yields exactly one [`Outcome`] on the results stream,
//! in completion order. The stream ends once the producer is exhausted and
//! every worker has finished.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use conform_core::WorkItem;

use crate::error::{JobError, PipelineError, RemediateError};
use crate::fault;
use crate::remediate::{Disposition, SkipReason};

// ---------------------------------------------------------------------------
// Worker / Outcome
// ---------------------------------------------------------------------------

/// Per-thread job processor.
///
/// Built on the thread that uses it, so it need not be `Send`.
pub trait Worker {
    fn process(&mut self, item: &WorkItem) -> Result<Disposition, RemediateError>;
}

/// Terminal status of one work item.
#[derive(Debug)]
pub enum OutcomeStatus {
    Rewritten,
    NoActionNeeded(SkipReason),
    Failed(JobError),
}

impl From<Disposition> for OutcomeStatus {
    fn from(d: Disposition) -> Self {
        match d {
            Disposition::Rewritten => OutcomeStatus::Rewritten,
            Disposition::NoActionNeeded(reason) => OutcomeStatus::NoActionNeeded(reason),
        }
    }
}

/// Result for one accepted work item.
#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub status: OutcomeStatus,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// A worker pool of fixed size.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    concurrency: usize,
}

impl Pipeline {
    /// A pool of `concurrency` workers; zero is raised to one.
    pub fn new(concurrency: usize) -> Self {
        Pipeline {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Start the producer and workers and return the results stream.
    ///
    /// Items whose key was already seen are dropped before they reach a
    /// worker. `make_worker` runs once per worker thread; if it fails, that
    /// thread reports every item it receives as [`JobError::WorkerInit`].
    pub fn spawn<I, F, W>(&self, items: I, make_worker: F) -> Result<OutcomeStream, PipelineError>
    where
        I: IntoIterator<Item = WorkItem>,
        I::IntoIter: Send + 'static,
        F: Fn() -> Result<W, RemediateError> + Send + Sync + 'static,
        W: Worker,
    {
        self.spawn_with(items, make_worker, spawn_named)
    }

    /// Workers start first and the producer last, so a failed spawn leaves
    /// no item dispatched: the job sender is dropped and the started workers
    /// are joined before the error is returned.
    fn spawn_with<I, F, W, S>(
        &self,
        items: I,
        make_worker: F,
        mut spawn: S,
    ) -> Result<OutcomeStream, PipelineError>
    where
        I: IntoIterator<Item = WorkItem>,
        I::IntoIter: Send + 'static,
        F: Fn() -> Result<W, RemediateError> + Send + Sync + 'static,
        W: Worker,
        S: FnMut(String, &'static str, Job) -> Result<JoinHandle<()>, PipelineError>,
    {
        let (job_tx, job_rx) = bounded::<WorkItem>(self.concurrency);
        let (out_tx, out_rx) = unbounded::<Outcome>();
        let make_worker = Arc::new(make_worker);
        let mut handles = Vec::with_capacity(self.concurrency + 1);

        for n in 0..self.concurrency {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            let make_worker = Arc::clone(&make_worker);
            let job: Job = Box::new(move || work(&*make_worker, rx, tx));
            match spawn(format!("conform-worker-{n}"), "worker", job) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    drop(job_tx);
                    join_all(handles);
                    return Err(e);
                }
            }
        }

        let items = items.into_iter();
        let job: Job = Box::new(move || produce(items, job_tx));
        match spawn("conform-producer".to_string(), "producer", job) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                // The rejected closure owned the job sender, so workers see
                // a closed queue.
                join_all(handles);
                return Err(e);
            }
        }

        Ok(OutcomeStream {
            rx: out_rx,
            handles,
        })
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

fn spawn_named(name: String, role: &'static str, f: Job) -> Result<JoinHandle<()>, PipelineError> {
    thread::Builder::new()
        .name(name)
        .spawn(f)
        .map_err(|source| PipelineError::Spawn { role, source })
}

fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("pipeline thread panicked outside a job");
        }
    }
}

fn produce(items: impl Iterator<Item = WorkItem>, tx: Sender<WorkItem>) {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.key().to_path_buf()) {
            tracing::warn!("duplicate work item dropped: {}", item.path.display());
            continue;
        }
        // All workers gone; nobody is listening any more.
        if tx.send(item).is_err() {
            break;
        }
    }
    tracing::debug!(accepted = seen.len(), "producer exhausted");
}

fn work<F, W>(make_worker: &F, rx: Receiver<WorkItem>, tx: Sender<Outcome>)
where
    F: Fn() -> Result<W, RemediateError>,
    W: Worker,
{
    let mut worker = match fault::catch(make_worker) {
        Ok(Ok(w)) => w,
        Ok(Err(e)) => return drain(rx, tx, e.to_string()),
        Err(e) => return drain(rx, tx, e.to_string()),
    };

    for item in rx {
        let status = match fault::catch(|| worker.process(&item)) {
            Ok(Ok(d)) => d.into(),
            Ok(Err(e)) => OutcomeStatus::Failed(e.into()),
            Err(e) => OutcomeStatus::Failed(e),
        };
        let outcome = Outcome {
            path: item.path,
            status,
        };
        if tx.send(outcome).is_err() {
            break;
        }
    }
}

fn drain(rx: Receiver<WorkItem>, tx: Sender<Outcome>, message: String) {
    tracing::error!("worker initialisation failed: {message}");
    for item in rx {
        let outcome = Outcome {
            path: item.path,
            status: OutcomeStatus::Failed(JobError::WorkerInit(message.clone())),
        };
        if tx.send(outcome).is_err() {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// OutcomeStream
// ---------------------------------------------------------------------------

/// Outcomes in completion order.
///
/// Iteration ends when every accepted item has been reported; the pipeline
/// threads are joined at that point. Dropping the stream early makes the
/// remaining threads wind down on their own.
pub struct OutcomeStream {
    rx: Receiver<Outcome>,
    handles: Vec<JoinHandle<()>>,
}

impl Iterator for OutcomeStream {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        match self.rx.recv() {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                join_all(std::mem::take(&mut self.handles));
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
