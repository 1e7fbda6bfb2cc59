//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, ServerConfig};
use crate::error::{Error, Result};
use crate::feed::Feed;
use crate::query::QueryConfig;
use crate::sentinel::Viewport;
use crate::source::{PageSource, SourceDefinition, StaticSource};
use crate::types::PageToken;
use crate::view::to_text;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Run {
                max_pages,
                viewport,
            } => self.run_feed(*max_pages, *viewport).await,
            Commands::Validate => self.validate(),
            Commands::Serve {
                port,
                items,
                page_size,
            } => {
                serve(ServerConfig {
                    port: *port,
                    total_items: *items,
                    page_size: *page_size,
                })
                .await
            }
        }
    }

    /// Resolve the source: YAML definition when given, demo source otherwise
    fn load_source(&self) -> Result<(Arc<dyn PageSource>, PageToken)> {
        match &self.cli.source {
            Some(path) => {
                let definition = SourceDefinition::from_file(path)?;
                let source = definition.build()?;
                Ok((Arc::new(source), definition.start_token()))
            }
            None => Ok((
                Arc::new(StaticSource::synthetic(5, 4)),
                PageToken::from(0u64),
            )),
        }
    }

    async fn check(&self) -> Result<()> {
        let (source, start) = self.load_source()?;
        match source.fetch_page(&start).await {
            Ok(page) => {
                let next = page
                    .next_token
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string);
                println!("OK: fetched {} items, next token: {next}", page.len());
                Ok(())
            }
            Err(e) => {
                println!("FAILED: {e}");
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let path = self
            .cli
            .source
            .as_ref()
            .ok_or_else(|| Error::config("--source is required for validate"))?;
        let definition = SourceDefinition::from_file(path)?;
        println!("OK: source '{}' at {}", definition.name, definition.base_url);
        Ok(())
    }

    async fn run_feed(&self, max_pages: usize, viewport_height: u32) -> Result<()> {
        let (source, start) = self.load_source()?;
        let viewport = Arc::new(Viewport::new(viewport_height));
        let feed = Feed::with_config(
            source,
            viewport.clone(),
            QueryConfig::new().with_start_token(start),
        );

        let mut frame = 0usize;
        loop {
            let node = feed.tick().await;
            let snapshot = feed.snapshot();

            // Keep the simulated scroll position pinned to the end of the
            // list so the sentinel stays visible for the next tick.
            viewport.set_item_count(snapshot.item_count());
            viewport.scroll_to_end();

            frame += 1;
            println!("--- frame {frame} ---");
            print!("{}", to_text(&node));
            if self.cli.verbose {
                let stats = feed.query().stats();
                println!(
                    "  ({} pages, {} items, {} failed fetches)",
                    stats.pages_fetched, stats.items_fetched, stats.failed_fetches
                );
            }

            if snapshot.status.is_error() || snapshot.error_detail.is_some() {
                break;
            }
            if max_pages > 0 && snapshot.pages.len() >= max_pages {
                break;
            }
            if snapshot.is_exhausted() {
                break;
            }
        }

        let stats = feed.query().stats();
        println!(
            "done: {} pages, {} items, {} failed fetches",
            stats.pages_fetched, stats.items_fetched, stats.failed_fetches
        );
        Ok(())
    }
}
