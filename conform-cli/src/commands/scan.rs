//! `conform scan`: report or add missing license headers across a repository.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use conform_core::{RunContext, Settings};
use conform_detector::FileFilter;
use conform_fixer::{scan_repository, Reporter};
use conform_history::GitRepository;

use crate::TemplateArg;

/// Arguments for `conform scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Repository root (must contain `.git`).
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Header template: `apache2.0` or `bsd`.
    #[arg(long)]
    pub tmpl: Option<TemplateArg>,

    /// Prepend headers to files that lack one.
    #[arg(long)]
    pub fix: bool,

    /// Copyright holder named in added headers.
    #[arg(long = "copyright-holder")]
    pub holder: Option<String>,

    /// Number of files processed at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// File name suffix to scan; repeat for several. Replaces the configured list.
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Directory name to skip; repeat for several. Replaces the configured list.
    #[arg(long = "exclude-dir")]
    pub exclude_dirs: Vec<String>,

    /// Print the final tally as JSON after the progress line.
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    pub fn run(self) -> Result<()> {
        let root = self
            .repo
            .canonicalize()
            .with_context(|| format!("cannot resolve repository path {}", self.repo.display()))?;

        let mut settings = Settings::load_at(&root)
            .with_context(|| format!("failed to load settings for {}", root.display()))?;
        self.apply(&mut settings);

        let git = GitRepository::open(&root).context("failed to open repository")?;
        let head = git.head().context("failed to resolve HEAD")?;
        let commit = git
            .commit(&head)
            .with_context(|| format!("HEAD {head} is not a commit"))?;
        tracing::info!(
            head = %head.short(),
            fix = self.fix,
            "scanning {} at \"{}\"",
            root.display(),
            commit.summary
        );

        let ctx = Arc::new(RunContext {
            repo_root: root,
            holder: settings.holder.clone(),
            fix: self.fix,
            head,
            template: settings.template,
        });

        let started = Instant::now();
        let outcomes = scan_repository(ctx, FileFilter::from_settings(&settings), settings.concurrency)
            .context("failed to start scan")?;
        let tally = Reporter::new(io::stdout().lock())
            .consume(outcomes)
            .context("failed to write progress")?;

        println!("\nTimeSpent: {:?}", started.elapsed());
        if self.json {
            println!("{}", serde_json::to_string(&tally)?);
        }
        Ok(())
    }

    /// Layer command-line flags over the loaded settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(holder) = &self.holder {
            settings.holder = holder.clone();
        }
        if let Some(tmpl) = self.tmpl {
            settings.template = tmpl.into();
        }
        if let Some(n) = self.concurrency {
            settings.concurrency = n;
        }
        if !self.extensions.is_empty() {
            settings.extensions = self.extensions.clone();
        }
        if !self.exclude_dirs.is_empty() {
            settings.exclude_dirs = self.exclude_dirs.clone();
        }
    }
}
