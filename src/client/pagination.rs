//! Pagination helpers for API requests

use serde::{Deserialize, Serialize};

/// Default page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page size accepted by the API.
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters for list requests.
///
/// Pages are 1-indexed, matching the API.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().page(2).limit(25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number (1-indexed)
    pub page: Option<usize>,
    /// Number of items per page
    pub limit: Option<usize>,
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Convert to query string parameters.
    ///
    /// Page and limit are always present, defaulting to page 1 and
    /// [`DEFAULT_PAGE_SIZE`], matching the API's own defaults so the cache
    /// key for an implicit first page equals the explicit one.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.unwrap_or(1).to_string()),
            ("limit", self.limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string()),
        ]
    }
}

/// A single page of results with pagination metadata.
///
/// Invariants maintained by the server and checked in tests:
/// `items.len() <= limit` and `total_pages == ceil(total_items / limit)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,

    /// Total number of items across all pages
    pub total_items: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Current page number (1-indexed)
    pub current_page: usize,

    /// Whether a next page exists
    pub has_next: bool,

    /// Whether a previous page exists
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Build a page from a full item set, mainly for tests and mocks.
    #[allow(dead_code)]
    pub fn paginate(all: Vec<T>, page: usize, limit: usize) -> Self {
        let total_items = all.len();
        let total_pages = total_items.div_ceil(limit.max(1));
        let start = (page.saturating_sub(1)) * limit;
        let items: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(limit)
            .collect();

        Self {
            items,
            total_items,
            total_pages,
            current_page: page,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams::new();
        let query = params.to_query_params();

        assert!(query.contains(&("page", "1".to_string())));
        assert!(query.contains(&("limit", DEFAULT_PAGE_SIZE.to_string())));
    }

    #[test]
    fn test_pagination_params_builder() {
        let params = PaginationParams::new().page(3).limit(25);

        let query = params.to_query_params();
        assert!(query.contains(&("page", "3".to_string())));
        assert!(query.contains(&("limit", "25".to_string())));
    }

    #[test]
    fn test_paginate_25_items_limit_10() {
        let all: Vec<u32> = (1..=25).collect();

        let page1 = Page::paginate(all.clone(), 1, 10);
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.total_items, 25);
        assert_eq!(page1.total_pages, 3);
        assert!(page1.has_next);
        assert!(!page1.has_prev);

        let page3 = Page::paginate(all, 3, 10);
        assert_eq!(page3.items.len(), 5);
        assert!(!page3.has_next);
        assert!(page3.has_prev);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let all: Vec<u32> = (1..=20).collect();
        let page = Page::paginate(all, 2, 10);

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_empty() {
        let page: Page<u32> = Page::paginate(vec![], 1, 10);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

}
