//! Page sources
//!
//! A page source is the adapter between the feed cache and wherever items
//! actually live. Given a page token it returns one page of items plus the
//! token the next fetch should resume from, or no token when the source is
//! exhausted.
//!
//! # Overview
//!
//! Two sources ship in the box: [`HttpSource`] fetches JSON pages over
//! REST, [`StaticSource`] serves a fixed in-memory page list for demos and
//! tests. [`SourceDefinition`] describes an HTTP source declaratively in
//! YAML.

mod definition;
mod http;
mod memory;

pub use definition::SourceDefinition;
pub use http::{HttpSource, HttpSourceConfig, HttpSourceConfigBuilder};
pub use memory::StaticSource;

use crate::error::Result;
use crate::types::{Page, PageToken};
use async_trait::async_trait;

/// Adapter contract for fetching one page of items.
///
/// Implementations resolve each request with either a complete page or a
/// single terminal error; there are no partial results. The cache issues
/// requests strictly sequentially, so implementations never see more than
/// one call in flight per query.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page identified by `token`.
    async fn fetch_page(&self, token: &PageToken) -> Result<Page>;
}

#[cfg(test)]
mod tests;
