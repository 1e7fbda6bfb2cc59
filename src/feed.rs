//! Feed driver
//!
//! Ties the three parts together: reads the sentinel signal, asks the
//! cache for the next page while the signal is up, and renders the current
//! snapshot. Rendering stays pure; this loop owns the side effect.

use crate::query::{InfiniteQuery, QueryConfig, QuerySnapshot, QueryStatus};
use crate::sentinel::VisibilitySignal;
use crate::source::PageSource;
use crate::view::{render, Node};
use std::sync::Arc;
use tracing::debug;

/// A scroll-driven paginated feed
pub struct Feed {
    query: InfiniteQuery,
    signal: Arc<dyn VisibilitySignal>,
}

impl Feed {
    /// Create a feed over `source`, triggered by `signal`
    pub fn new(source: Arc<dyn PageSource>, signal: Arc<dyn VisibilitySignal>) -> Self {
        Self {
            query: InfiniteQuery::new(source),
            signal,
        }
    }

    /// Create a feed with an explicit query configuration
    pub fn with_config(
        source: Arc<dyn PageSource>,
        signal: Arc<dyn VisibilitySignal>,
        config: QueryConfig,
    ) -> Self {
        Self {
            query: InfiniteQuery::with_config(source, config),
            signal,
        }
    }

    /// The underlying query
    pub fn query(&self) -> &InfiniteQuery {
        &self.query
    }

    /// Current snapshot
    pub fn snapshot(&self) -> QuerySnapshot {
        self.query.snapshot()
    }

    /// Run one step of the feed loop: fetch if warranted, then render.
    ///
    /// The first tick issues the mount fetch regardless of the signal;
    /// after that, fetching happens only while the sentinel is visible.
    /// An error screen renders no sentinel, so a stale visible signal does
    /// not refetch there. Safe to call as often as the host likes: the
    /// in-flight and exhausted guards make repeated triggering idempotent.
    pub async fn tick(&self) -> Node {
        let snapshot = self.query.snapshot();
        let should_fetch = match snapshot.status {
            QueryStatus::Pending => true,
            QueryStatus::Error => false,
            QueryStatus::Success => self.signal.is_visible(),
        };
        if should_fetch {
            let outcome = self.query.fetch_next().await;
            debug!(?outcome, "feed tick");
        }
        render(&self.query.snapshot())
    }

    /// Tear the feed down; late fetch results are discarded
    pub fn close(&self) {
        self.query.close();
    }
}

impl std::fmt::Debug for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
