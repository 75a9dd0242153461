//! `quire nav` command implementation.

use std::io::Write;

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site does not load or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let site = self.site.load_site()?;

        let mut stdout = std::io::stdout().lock();
        if self.compact {
            serde_json::to_writer(&mut stdout, site.rendered_nav())?;
        } else {
            serde_json::to_writer_pretty(&mut stdout, site.rendered_nav())?;
        }
        writeln!(stdout)?;
        Ok(())
    }
}
