//! conform: license-header conformance for a git repository.
//!
//! # Usage
//!
//! ```text
//! conform scan [--repo <path>] [--tmpl apache2.0|bsd] [--fix]
//!              [--copyright-holder <name>] [--concurrency <n>]
//!              [--ext <suffix>]... [--exclude-dir <name>]... [--json]
//! conform header [--tmpl apache2.0|bsd] [--copyright-holder <name>] [--year <y>]
//! ```

mod commands;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{header::HeaderArgs, scan::ScanArgs};
use conform_core::HeaderTemplate;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "conform",
    version,
    about = "Check and add license headers to source files in a git repository",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report (and with --fix, add) missing license headers.
    Scan(ScanArgs),

    /// Print the header that `scan --fix` would prepend.
    Header(HeaderArgs),
}

// ---------------------------------------------------------------------------
// Shared template argument
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `HeaderTemplate` from CLI args.
///
/// Only `bsd` selects the BSD header; any other value means Apache 2.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateArg(pub HeaderTemplate);

impl FromStr for TemplateArg {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(HeaderTemplate::from_option(s)))
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<TemplateArg> for HeaderTemplate {
    fn from(t: TemplateArg) -> Self {
        t.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Logs go to stderr; stdout carries only the progress line and JSON.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => args.run(),
        Commands::Header(args) => args.run(),
    }
}
