//! In-memory page source
//!
//! Serves a fixed list of pages, mainly for demos and tests.

use super::PageSource;
use crate::error::{Error, Result};
use crate::types::{Item, Page, PageToken};
use async_trait::async_trait;

/// A page source backed by a fixed, pre-built page list.
///
/// Tokens are page positions rendered as strings: the first page is `"0"`,
/// and each returned page points at the next position until the final page,
/// which carries no token.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: Vec<Vec<Item>>,
}

impl StaticSource {
    /// Create a source over the given pages
    pub fn new(pages: Vec<Vec<Item>>) -> Self {
        Self { pages }
    }

    /// Build a synthetic source of `page_count` pages with `page_size`
    /// items each, labeled `Item 0`, `Item 1`, ...
    pub fn synthetic(page_count: usize, page_size: usize) -> Self {
        let pages = (0..page_count)
            .map(|page| {
                (0..page_size)
                    .map(|slot| {
                        let id = (page * page_size + slot) as u64;
                        Item::new(id, format!("Item {id}"))
                    })
                    .collect()
            })
            .collect();
        Self { pages }
    }

    /// Number of pages this source serves
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn fetch_page(&self, token: &PageToken) -> Result<Page> {
        let index: usize = token
            .as_str()
            .parse()
            .map_err(|_| Error::source(format!("invalid page token: {token}")))?;

        let items = self.pages.get(index).cloned().ok_or_else(|| {
            Error::source(format!(
                "page {index} out of range ({} pages)",
                self.pages.len()
            ))
        })?;

        let mut page = Page::new(index, items);
        if index + 1 < self.pages.len() {
            page = page.with_next_token((index + 1) as u64);
        }
        Ok(page)
    }
}
