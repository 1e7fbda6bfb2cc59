//! Sentinel visibility
//!
//! The feed loads more items when a sentinel row trailing the list becomes
//! visible. This module abstracts that as a boolean signal source: a
//! scroll-geometry implementation for hosts that track offsets, and a
//! manual one for hosts that bring their own intersection source.
//!
//! Signals are level-triggered: `is_visible` reports the current state on
//! every read, so a sentinel that stays on screen keeps triggering until
//! the cache's guards make further triggers no-ops.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// A signal source exposing whether the sentinel is currently visible
pub trait VisibilitySignal: Send + Sync {
    /// True while the sentinel intersects the viewport
    fn is_visible(&self) -> bool;
}

/// Row geometry of the rendered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Height of one item row
    pub row_height: u32,
    /// Vertical gap between rows
    pub gap: u32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            row_height: 48,
            gap: 8,
        }
    }
}

impl RowLayout {
    /// Start offset of the row at `index`
    fn row_start(&self, index: usize) -> u64 {
        index as u64 * (u64::from(self.row_height) + u64::from(self.gap))
    }
}

/// Scroll-geometry visibility.
///
/// The sentinel occupies one row directly after the last item and is
/// visible whenever that row intersects `[offset, offset + height)`.
/// Every mutation (`scroll_to`, `scroll_by`, `set_item_count`, `resize`)
/// changes what the next `is_visible` read reports; there is no separate
/// recompute step and no debounce.
#[derive(Debug)]
pub struct Viewport {
    layout: RowLayout,
    height: AtomicU32,
    offset: AtomicU64,
    item_count: AtomicUsize,
}

impl Viewport {
    /// Create a viewport of `height` pixels over an empty list
    pub fn new(height: u32) -> Self {
        Self::with_layout(height, RowLayout::default())
    }

    /// Create a viewport with an explicit row layout
    pub fn with_layout(height: u32, layout: RowLayout) -> Self {
        Self {
            layout,
            height: AtomicU32::new(height),
            offset: AtomicU64::new(0),
            item_count: AtomicUsize::new(0),
        }
    }

    /// Current scroll offset
    pub fn offset(&self) -> u64 {
        self.offset.load(Ordering::Relaxed)
    }

    /// Current viewport height
    pub fn height(&self) -> u32 {
        self.height.load(Ordering::Relaxed)
    }

    /// Scroll to an absolute offset
    pub fn scroll_to(&self, offset: u64) {
        self.offset.store(offset, Ordering::Relaxed);
    }

    /// Scroll by a relative delta, clamped at the top
    pub fn scroll_by(&self, delta: i64) {
        let current = self.offset.load(Ordering::Relaxed);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as u64)
        };
        self.offset.store(next, Ordering::Relaxed);
    }

    /// Update the number of item rows above the sentinel
    pub fn set_item_count(&self, count: usize) {
        self.item_count.store(count, Ordering::Relaxed);
    }

    /// Change the viewport height
    pub fn resize(&self, height: u32) {
        self.height.store(height, Ordering::Relaxed);
    }

    /// Total scrollable extent, sentinel row included
    pub fn content_end(&self) -> u64 {
        let count = self.item_count.load(Ordering::Relaxed);
        self.layout.row_start(count) + u64::from(self.layout.row_height)
    }

    /// Scroll so the sentinel row sits inside the viewport
    pub fn scroll_to_end(&self) {
        let height = u64::from(self.height.load(Ordering::Relaxed));
        self.scroll_to(self.content_end().saturating_sub(height));
    }
}

impl VisibilitySignal for Viewport {
    fn is_visible(&self) -> bool {
        let count = self.item_count.load(Ordering::Relaxed);
        let start = self.layout.row_start(count);
        let end = start + u64::from(self.layout.row_height);

        let top = self.offset.load(Ordering::Relaxed);
        let bottom = top + u64::from(self.height.load(Ordering::Relaxed));
        start < bottom && end > top
    }
}

/// Settable visibility signal for tests and hosts with their own
/// intersection source
#[derive(Debug, Clone, Default)]
pub struct ManualSignal {
    visible: Arc<AtomicBool>,
}

impl ManualSignal {
    /// Create a signal with an initial state
    pub fn new(visible: bool) -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(visible)),
        }
    }

    /// Set the current state
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }
}

impl VisibilitySignal for ManualSignal {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}
