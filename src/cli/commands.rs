//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagefeed command-line interface
#[derive(Parser, Debug)]
#[command(name = "pagefeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source definition file (YAML); omit to use a built-in demo source
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the first page to verify the source is reachable
    Check,

    /// Drive the feed, auto-scrolling until the source is exhausted
    Run {
        /// Stop after this many pages (0 = until exhausted)
        #[arg(long, default_value = "0")]
        max_pages: usize,

        /// Viewport height in pixels
        #[arg(long, default_value = "240")]
        viewport: u32,
    },

    /// Validate a source definition without fetching
    Validate,

    /// Serve a demo paginated item API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4600")]
        port: u16,

        /// Total number of items served
        #[arg(long, default_value = "100")]
        items: usize,

        /// Items per page
        #[arg(long, default_value = "10")]
        page_size: usize,
    },
}
