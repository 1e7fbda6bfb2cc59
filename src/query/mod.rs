//! Paged-fetch cache
//!
//! `InfiniteQuery` owns the ordered sequence of fetched pages for one
//! logical query and the aggregate status derived from fetch completions.
//!
//! # Overview
//!
//! At most one fetch is in flight at a time; a request made while another
//! is outstanding is a no-op, which makes scroll-driven triggering safe to
//! repeat. Fetches are issued strictly sequentially and never retried by
//! the cache itself: a failure records its message and waits for the next
//! explicit trigger.

mod types;

pub use types::{FeedStats, FetchOutcome, QueryConfig, QuerySnapshot, QueryStatus};

use crate::error::Result;
use crate::source::PageSource;
use crate::types::Page;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Internal cache state.
///
/// Guarded by a mutex that is only held for short, synchronous sections;
/// never across the adapter await.
struct QueryState {
    pages: Vec<Page>,
    error_detail: Option<String>,
    in_flight: bool,
    closed: bool,
    generation: u64,
    stats: FeedStats,
}

impl QueryState {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            error_detail: None,
            in_flight: false,
            closed: false,
            generation: 0,
            stats: FeedStats::default(),
        }
    }

    /// Pending until the first fetch resolves; Error only while no page has
    /// ever been fetched; Success from the first page onward.
    fn status(&self) -> QueryStatus {
        if !self.pages.is_empty() {
            QueryStatus::Success
        } else if self.error_detail.is_some() {
            QueryStatus::Error
        } else {
            QueryStatus::Pending
        }
    }
}

/// Cache-backed infinite query over a page source.
///
/// All methods take `&self`; the query is safe to share behind an `Arc`
/// and trigger from wherever the host propagates visibility changes.
pub struct InfiniteQuery {
    source: Arc<dyn PageSource>,
    config: QueryConfig,
    state: Mutex<QueryState>,
}

impl InfiniteQuery {
    /// Create a query over `source` with the default configuration
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self::with_config(source, QueryConfig::default())
    }

    /// Create a query with an explicit configuration
    pub fn with_config(source: Arc<dyn PageSource>, config: QueryConfig) -> Self {
        Self {
            source,
            config,
            state: Mutex::new(QueryState::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, QueryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Point-in-time snapshot of pages, status, and fetch progress
    pub fn snapshot(&self) -> QuerySnapshot {
        let state = self.state();
        QuerySnapshot {
            pages: state.pages.clone(),
            status: state.status(),
            is_fetching_next: state.in_flight,
            error_detail: state.error_detail.clone(),
        }
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> FeedStats {
        self.state().stats
    }

    /// True when the last fetched page reported no next token
    pub fn is_exhausted(&self) -> bool {
        self.state().pages.last().is_some_and(Page::is_last)
    }

    /// Request the next page.
    ///
    /// At most one fetch is in flight at a time: a call made while another
    /// is outstanding returns [`FetchOutcome::InFlight`] without touching
    /// the source. Once the source reports no next token, further calls
    /// return [`FetchOutcome::Exhausted`]. A failed fetch records its
    /// message and stops there; the next call re-attempts the same token.
    pub async fn fetch_next(&self) -> FetchOutcome {
        let (token, generation) = {
            let mut state = self.state();
            if state.closed {
                return FetchOutcome::Closed;
            }
            if state.in_flight {
                return FetchOutcome::InFlight;
            }
            let token = match state.pages.last() {
                Some(page) => match &page.next_token {
                    Some(token) => token.clone(),
                    None => return FetchOutcome::Exhausted,
                },
                None => self.config.start_token.clone(),
            };
            state.in_flight = true;
            (token, state.generation)
        };

        debug!(token = token.as_str(), "fetching next page");
        let result = self.source.fetch_page(&token).await;
        self.apply(generation, result)
    }

    /// Tear the query down.
    ///
    /// There is no cancellation: an in-flight fetch runs to completion, but
    /// its result is discarded instead of mutating closed state.
    pub fn close(&self) {
        let mut state = self.state();
        state.closed = true;
        state.generation += 1;
        state.in_flight = false;
    }

    /// Clear pages, status, and error back to pending.
    ///
    /// Any in-flight fetch keeps running; its result is discarded.
    pub fn reset(&self) {
        let mut state = self.state();
        state.generation += 1;
        state.in_flight = false;
        state.pages.clear();
        state.error_detail = None;
    }

    /// Fold a resolved fetch back into the cache.
    ///
    /// A result carrying a stale generation means the query was reset or
    /// closed while the fetch was in flight; it is dropped without mutating
    /// state.
    fn apply(&self, generation: u64, result: Result<Page>) -> FetchOutcome {
        let mut state = self.state();
        if state.generation != generation {
            debug!("discarding late fetch result");
            return FetchOutcome::Discarded;
        }

        state.in_flight = false;
        match result {
            Ok(mut page) => {
                // Fetch order is display order: index always equals the
                // number of pages appended before this one.
                page.index = state.pages.len();
                state.error_detail = None;
                state.stats.add_page(page.len());
                debug!(index = page.index, items = page.len(), "page fetched");
                state.pages.push(page);
                FetchOutcome::Fetched
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                state.error_detail = Some(e.to_string());
                state.stats.add_failure();
                FetchOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for InfiniteQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("InfiniteQuery")
            .field("pages", &state.pages.len())
            .field("status", &state.status())
            .field("in_flight", &state.in_flight)
            .field("closed", &state.closed)
            .finish_non_exhaustive()
    }
}
