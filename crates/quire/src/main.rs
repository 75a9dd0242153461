//! Quire CLI - documentation site navigation and theming.
//!
//! Provides commands for:
//! - `check`: Validate navigation, links and theme configuration
//! - `nav`: Print the rendered navigation as JSON
//! - `slots`: List extension points and their bindings
//! - `render`: Print the composed page shell for a page path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, RenderArgs, SlotsArgs};
use output::Output;

/// Quire - documentation site navigation and theming.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    /// Enable verbose output (site load summary and warnings).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration and report every problem.
    Check(CheckArgs),
    /// Print the rendered nav bar and sidebar as JSON.
    Nav(NavArgs),
    /// List extension points of the page shell and their bindings.
    Slots(SlotsArgs),
    /// Print the composed page HTML for a page path.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Slots(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_global_verbose() {
        let cli = Cli::try_parse_from(["quire", "render", "/downloads/tools.md", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_render_requires_path() {
        assert!(Cli::try_parse_from(["quire", "render"]).is_err());
    }

    #[test]
    fn test_parse_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "quire",
            "check",
            "--config",
            "site/quire.toml",
            "--source-dir",
            "content",
        ])
        .unwrap();
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
