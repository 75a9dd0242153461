//! `quire check` command implementation.

use clap::Args;
use quire_site::{Site, SiteError};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error listing every problem if the site does not load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config()?;

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: none found, using defaults"),
        }
        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        let site = match Site::load(&config) {
            Ok(site) => site,
            Err(SiteError::Invalid(problems)) => {
                for problem in &problems {
                    output.detail(&format!("  - {problem}"));
                }
                return Err(SiteError::Invalid(problems).into());
            }
            Err(e) => return Err(e.into()),
        };

        output.success(&format!(
            "OK: {} documents, {} nav links, {} components, {} slot bindings",
            site.inventory().len(),
            site.navigation().nav().quick_links().len()
                + site.navigation().sidebar().quick_links().len(),
            site.registry().component_names().count(),
            site.registry().composition().len(),
        ));
        Ok(())
    }
}
