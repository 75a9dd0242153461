//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod render;
pub(crate) mod slots;

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_site::Site;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use render::RenderArgs;
pub(crate) use slots::SlotsArgs;

/// Options shared by every command that loads the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(long, env = "QUIRE_TITLE")]
    title: Option<String>,
}

impl SiteArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            title: self.title.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and assemble the site.
    pub(crate) fn load_site(&self) -> Result<Site, CliError> {
        let config = self.load_config()?;
        Ok(Site::load(&config)?)
    }
}
