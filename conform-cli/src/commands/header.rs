//! `conform header`: preview a rendered header.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use conform_core::{config::DEFAULT_HOLDER, CopyrightInfo};
use conform_renderer::HeaderRenderer;

use crate::TemplateArg;

/// Arguments for `conform header`.
#[derive(Args, Debug)]
pub struct HeaderArgs {
    /// Header template: `apache2.0` (default) or `bsd`.
    #[arg(long, default_value = "apache2.0")]
    pub tmpl: TemplateArg,

    /// Copyright holder named in the header.
    #[arg(long = "copyright-holder", default_value = DEFAULT_HOLDER)]
    pub holder: String,

    /// Copyright year; defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
}

impl HeaderArgs {
    pub fn run(self) -> Result<()> {
        let info = CopyrightInfo {
            year: self.year.unwrap_or_else(|| chrono::Local::now().year()),
            holder: self.holder,
        };
        let header = HeaderRenderer::new()
            .and_then(|r| r.render(&info, self.tmpl.into()))
            .context("failed to render header")?;

        let mut out = io::stdout().lock();
        out.write_all(&header)?;
        out.flush()?;
        Ok(())
    }
}
