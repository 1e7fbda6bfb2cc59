//! Query state types
//!
//! Snapshot, status, outcome, and configuration types for the paged-fetch
//! cache.

use crate::types::{Page, PageToken};

/// Aggregate status of a paged query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No fetch has resolved yet
    Pending,
    /// The most recent fetch failed and no page has ever been fetched
    Error,
    /// At least one page has been fetched
    Success,
}

impl QueryStatus {
    /// Check if the query is still pending
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if the query is in the error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if the query has fetched at least one page
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Point-in-time view of a paged query.
///
/// Snapshots are detached from the cache: cheap to clone, safe to hold
/// across await points, never mutated after they are handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySnapshot {
    /// Fetched pages in fetch order
    pub pages: Vec<Page>,
    /// Aggregate status
    pub status: QueryStatus,
    /// True while a fetch is in flight
    pub is_fetching_next: bool,
    /// Message of the most recent failed fetch, if any
    pub error_detail: Option<String>,
}

impl QuerySnapshot {
    /// Snapshot of a query that has not resolved anything yet
    pub fn pending() -> Self {
        Self {
            pages: Vec::new(),
            status: QueryStatus::Pending,
            is_fetching_next: false,
            error_detail: None,
        }
    }

    /// Total items across all pages
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// True when the last fetched page reported no next token
    pub fn is_exhausted(&self) -> bool {
        self.pages.last().is_some_and(Page::is_last)
    }
}

/// Result of a `fetch_next` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and appended
    Fetched,
    /// The fetch resolved with an error
    Failed,
    /// Another fetch was already in flight; nothing was issued
    InFlight,
    /// The last page reported no next token; nothing was issued
    Exhausted,
    /// The query was closed; nothing was issued
    Closed,
    /// The query was reset or closed mid-fetch; the result was dropped
    Discarded,
}

impl FetchOutcome {
    /// True when the call issued no request at all
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::InFlight | Self::Exhausted | Self::Closed)
    }
}

/// Configuration for a paged query
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Token used for the first fetch
    pub start_token: PageToken,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            start_token: PageToken::from(0u64),
        }
    }
}

impl QueryConfig {
    /// Create a new query config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token used for the first fetch
    #[must_use]
    pub fn with_start_token(mut self, token: impl Into<PageToken>) -> Self {
        self.start_token = token.into();
        self
    }
}

/// Counters accumulated over the life of a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Items fetched successfully
    pub items_fetched: usize,
    /// Fetches that resolved with an error
    pub failed_fetches: usize,
}

impl FeedStats {
    pub(crate) fn add_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_fetched += items;
    }

    pub(crate) fn add_failure(&mut self) {
        self.failed_fetches += 1;
    }
}
