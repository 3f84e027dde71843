use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use super::page::PageCommand;
use crate::config::Config;
use crate::{init_logging, tui};

/// Pokédex - browse the PokéAPI page by page from your terminal
#[derive(Parser)]
#[command(
    name = "pokedex",
    version,
    about = "Browse the PokéAPI page by page from your terminal",
    long_about = r#"Pokédex fetches Pokémon from the PokéAPI twenty at a time and shows them as cards.

Examples:
  pokedex                         # Start interactive mode on page 1
  pokedex --page 7                # Start interactive mode on page 7
  pokedex page 3                  # Print page 3 as text
  pokedex page 3 --format html    # Print page 3 as HTML card markup"#
)]
pub struct Cli {
    /// Page to open in interactive mode
    #[arg(short = 'p', long = "page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Path to a JSON configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a single page and exit
    Page(PageCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::init(self.config.as_deref()).await?;
        config.validate()?;

        match self.command {
            Some(Commands::Page(page_cmd)) => {
                init_logging(self.debug, None)?;
                debug!("Configuration initialized: {:?}", config);
                page_cmd.execute(&config).await
            }
            None => {
                // Logs go to a file so they do not draw over the alternate screen
                let log_path = config.log_path();
                init_logging(self.debug, Some(&log_path))?;
                debug!("Configuration initialized: {:?}", config);

                info!("Starting interactive mode on page {}", self.page);
                tui::run(&config, self.page).await?;

                info!("Application finished");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::page::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interactive_defaults() {
        let cli = Cli::try_parse_from(["pokedex"]).unwrap();
        assert_eq!(cli.page, 1);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["pokedex", "--page", "7", "-d"]).unwrap();
        assert_eq!(cli.page, 7);
        assert!(cli.debug);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["pokedex", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["pokedex", "page", "0"]).is_err());
    }

    #[test]
    fn test_page_subcommand() {
        let cli = Cli::try_parse_from(["pokedex", "page", "3", "--format", "html"]).unwrap();
        match cli.command {
            Some(Commands::Page(cmd)) => {
                assert_eq!(cmd.page, 3);
                assert_eq!(cmd.format, OutputFormat::Html);
            }
            None => panic!("expected page subcommand"),
        }
    }
}
