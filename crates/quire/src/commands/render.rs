//! `quire render` command implementation.

use std::io::Write;

use clap::Args;
use quire_site::SiteError;

use super::SiteArgs;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page path to render (e.g. `/` or `/downloads/tools.md`).
    path: String,

    #[command(flatten)]
    site: SiteArgs,

    /// Render the not-found page instead of failing for unknown paths.
    #[arg(long)]
    allow_missing: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site does not load or the page does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let site = self.site.load_site()?;

        let html = match site.render_page(&self.path) {
            Err(SiteError::PageNotFound(_)) if self.allow_missing => {
                tracing::warn!(path = %self.path, "Page not found, rendering 404");
                site.render_not_found(&self.path)?
            }
            result => result?,
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{html}")?;
        Ok(())
    }
}
