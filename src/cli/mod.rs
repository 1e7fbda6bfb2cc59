//! CLI module
//!
//! Command-line interface for driving feeds.
//!
//! # Commands
//!
//! - `check` - Fetch the first page to verify the source is reachable
//! - `run` - Drive the feed, auto-scrolling until the source is exhausted
//! - `validate` - Validate a source definition without fetching
//! - `serve` - Start a demo paginated item API

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{serve, ServerConfig};
