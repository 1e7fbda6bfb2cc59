//! Common types used throughout pagefeed
//!
//! The item, page, and token types shared by sources, the cache, and the
//! view.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Item
// ============================================================================

/// A single list entry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier.
    pub id: u64,
    /// Display label.
    pub name: String,
}

impl Item {
    /// Create a new item
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ============================================================================
// Page Token
// ============================================================================

/// Opaque cursor identifying where the next fetch should resume.
///
/// Sources decide what the token means; the cache only threads it through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Create a token from its raw value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PageToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for PageToken {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// ============================================================================
// Page
// ============================================================================

/// One fetched page of items. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 0-based position in fetch order, assigned by the cache on append.
    pub index: usize,
    /// Items in the order the source returned them.
    pub items: Vec<Item>,
    /// Token for the next page, `None` when the source is exhausted.
    pub next_token: Option<PageToken>,
}

impl Page {
    /// Create a page with no next token
    pub fn new(index: usize, items: Vec<Item>) -> Self {
        Self {
            index,
            items,
            next_token: None,
        }
    }

    /// Set the token the next fetch should resume from
    #[must_use]
    pub fn with_next_token(mut self, token: impl Into<PageToken>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// True when the source reported no further pages
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_token_roundtrip() {
        let token = PageToken::from(7u64);
        assert_eq!(token.as_str(), "7");
        assert_eq!(token.to_string(), "7");
        assert_eq!(token, PageToken::new("7"));
    }

    #[test]
    fn test_page_builders() {
        let page = Page::new(0, vec![Item::new(1, "A")]).with_next_token(1u64);
        assert_eq!(page.len(), 1);
        assert!(!page.is_empty());
        assert!(!page.is_last());
        assert_eq!(page.next_token, Some(PageToken::from(1u64)));

        let last = Page::new(1, vec![]);
        assert!(last.is_last());
        assert!(last.is_empty());
    }
}
