//
//  storedesk
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types
//!
//! List endpoints take 1-based `page` and `size` query parameters and answer
//! with a page object under the envelope's `data` field. Depending on the
//! endpoint, the items arrive under `records`, `list` or `rows`; [`Page`]
//! accepts all three.
//!
//! # Example
//!
//! ```rust
//! use storedesk::api::common::Page;
//!
//! let json = r#"{"list": [1, 2, 3], "total": 23, "page": 1, "size": 3}"#;
//! let page: Page<u32> = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(page.records, vec![1, 2, 3]);
//! assert_eq!(page.total_pages(), 8);
//! assert!(page.has_next());
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of results from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new", alias = "list", alias = "rows")]
    pub records: Vec<T>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,

    /// Current page number (1-indexed).
    #[serde(default = "first_page", alias = "current", alias = "pageNum")]
    pub page: u32,

    /// Number of items per page.
    #[serde(default = "default_size", alias = "pageSize")]
    pub size: u32,
}

fn first_page() -> u32 {
    1
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            page: first_page(),
            size: default_size(),
        }
    }
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total` items.
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Pagination and search parameters shared by list commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number, starting at 1.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Optional free-text search; omitted from the request when empty.
    pub keyword: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            keyword: None,
        }
    }
}

impl ListQuery {
    /// Query for a specific page.
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size,
            keyword: None,
        }
    }

    /// Adds a keyword filter.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_aliases() {
        let page: Page<String> =
            serde_json::from_str(r#"{"records": ["a"], "total": 1, "current": 2, "pageSize": 5}"#)
                .unwrap();
        assert_eq!(page.records, vec!["a"]);
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 5);

        let rows: Page<u8> = serde_json::from_str(r#"{"rows": [7]}"#).unwrap();
        assert_eq!(rows.records, vec![7]);
        assert_eq!(rows.page, 1);
        assert_eq!(rows.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<u8> = Page {
            records: vec![],
            total: 20,
            page: 2,
            size: 10,
        };
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());
    }

    #[test]
    fn test_list_query_clamps_page() {
        assert_eq!(ListQuery::page(0, 20).page, 1);
    }
}
