//! # pagefeed
//!
//! A minimal, Rust-native engine for cache-backed infinite pagination.
//!
//! A feed fetches pages of items from a remote source, tracks loading and
//! error state, and loads the next page whenever a sentinel row trailing the
//! list scrolls into view.
//!
//! ## Features
//!
//! - **Pluggable page sources**: anything implementing `PageSource` works;
//!   an HTTP/JSON source and an in-memory source ship in the box
//! - **Paged-fetch cache**: ordered pages, derived status, and a
//!   single-in-flight guard that makes repeated triggering safe
//! - **Headless view**: rendering is a pure function of a query snapshot,
//!   so any host (TUI, GUI, tests) can walk the node tree
//! - **YAML source definitions**: point the feed at an API without code
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefeed::{Feed, ManualSignal, StaticSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = Arc::new(StaticSource::synthetic(5, 4));
//!     let signal = Arc::new(ManualSignal::new(true));
//!     let feed = Feed::new(source, signal);
//!
//!     loop {
//!         let node = feed.tick().await;
//!         // hand `node` to the host UI
//!         if feed.query().is_exhausted() {
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                          Feed                             │
//! │  tick() → fetch while sentinel visible → render snapshot  │
//! └───────────────────────────────────────────────────────────┘
//!            │                   │                   │
//! ┌──────────┴──────┐  ┌─────────┴───────┐  ┌────────┴───────┐
//! │   PageSource    │  │  InfiniteQuery  │  │      View      │
//! ├─────────────────┤  ├─────────────────┤  ├────────────────┤
//! │ HttpSource      │  │ pages + status  │  │ pure render    │
//! │ StaticSource    │  │ in-flight guard │  │ node tree      │
//! │ YAML definition │  │ safe discard    │  │ text formatter │
//! └─────────────────┘  └─────────────────┘  └────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the feed engine
pub mod error;

/// Common types shared across modules
pub mod types;

/// Page sources: the adapter boundary to wherever items live
pub mod source;

/// The paged-fetch cache
pub mod query;

/// Sentinel visibility signals
pub mod sentinel;

/// Pure rendering of query snapshots
pub mod view;

/// The feed driver tying cache, sentinel, and view together
pub mod feed;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use feed::Feed;
pub use query::{
    FeedStats, FetchOutcome, InfiniteQuery, QueryConfig, QuerySnapshot, QueryStatus,
};
pub use sentinel::{ManualSignal, RowLayout, Viewport, VisibilitySignal};
pub use source::{HttpSource, HttpSourceConfig, PageSource, SourceDefinition, StaticSource};
pub use types::{Item, Page, PageToken};
pub use view::{render, to_text, Node};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
