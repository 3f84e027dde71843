use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{HttpPokeApi, PokeApi};
use crate::config::Config;
use crate::loader::PageLoader;
use crate::render::{markup, text, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Load a single page non-interactively and print it
#[derive(Debug, Args)]
pub struct PageCommand {
    /// Page number, starting at 1
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PageCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing page command");

        let api: Arc<dyn PokeApi> = Arc::new(HttpPokeApi::new(config)?);
        let output = self.render(api).await?;

        print!("{}", output);
        Ok(())
    }

    /// Load the page and render it in the requested format
    pub(crate) async fn render(&self, api: Arc<dyn PokeApi>) -> Result<String> {
        // Awaited loads report inline; nothing listens on this channel
        let (events, _progress) = mpsc::unbounded_channel();
        let mut loader = PageLoader::new(api, events);
        let mut renderer = Renderer::new();

        let items = loader
            .load_page(self.page)
            .await
            .with_context(|| format!("Error loading Pokémon on page {}", self.page))?;

        let state = loader.state();
        info!("Page {} of {}: {} Pokémon", state.current_page, state.total_pages, items.len());

        renderer.render_items(&items);
        renderer.render_pagination(state.current_page, state.total_pages);

        let mut output = match self.format {
            OutputFormat::Text => text::cards(renderer.cards()),
            OutputFormat::Html => format!(
                "<div id=\"characters-container\">\n{}</div>\n",
                markup::cards(renderer.cards())
            ),
        };

        if let Some(controls) = renderer.pagination() {
            output.push('\n');
            output.push_str(&match self.format {
                OutputFormat::Text => text::pagination(controls),
                OutputFormat::Html => markup::pagination(controls),
            });
        }

        Ok(output)
    }
}
