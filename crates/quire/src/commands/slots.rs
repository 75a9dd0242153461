//! `quire slots` command implementation.

use std::io::Write;

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;

/// Arguments for the slots command.
#[derive(Args)]
pub(crate) struct SlotsArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Only list extension points that have a binding.
    #[arg(long)]
    bound: bool,
}

impl SlotsArgs {
    /// Execute the slots command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site does not load or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let site = self.site.load_site()?;
        let registry = site.registry();
        let composition = registry.composition();

        let mut stdout = std::io::stdout().lock();
        for point in registry.catalog() {
            match composition.get(point) {
                Some(component) => writeln!(stdout, "{point}\t{component}")?,
                None if !self.bound => writeln!(stdout, "{point}\t-")?,
                None => {}
            }
        }
        Ok(())
    }
}
