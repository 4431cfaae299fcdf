//! Whole-repository entry point: discovery wired into the pipeline.

use std::sync::Arc;

use conform_core::{RunContext, WorkItem};
use conform_detector::{source_files, FileFilter};
use conform_history::GitRepository;

use crate::error::PipelineError;
use crate::pipeline::{OutcomeStream, Pipeline};
use crate::remediate::Remediator;

/// Walk `ctx.repo_root` with `filter` and remediate every match on
/// `concurrency` workers, each holding its own repository handle.
pub fn scan_repository(
    ctx: Arc<RunContext>,
    filter: FileFilter,
    concurrency: usize,
) -> Result<OutcomeStream, PipelineError> {
    let root = ctx.repo_root.clone();
    let items = source_files(&root, move |path, meta| filter.matches(path, meta))
        .map({
            let ctx = Arc::clone(&ctx);
            move |path| WorkItem::new(path, Arc::clone(&ctx))
        });

    let pipeline = Pipeline::new(concurrency);
    tracing::debug!(
        root = %root.display(),
        workers = pipeline.concurrency(),
        fix = ctx.fix,
        "starting scan"
    );
    pipeline.spawn(items, move || Remediator::new(GitRepository::open(&root)?))
}
