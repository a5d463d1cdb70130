//! Query results and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Default number of page links shown by the pager.
pub const DEFAULT_VISIBLE_PAGES: usize = 7;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Number of matching items across all pages.
    pub total: usize,
    /// `ceil(total / per_page)`, 0 when nothing matched.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `per_page` must be non-zero.
    pub fn new(page: u32, per_page: u32, total: usize) -> Self {
        let per_page_len = per_page.max(1) as usize;
        let total_pages = total.div_ceil(per_page_len);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: (page as usize) < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.per_page as usize)
    }

    /// Whether the requested page lies beyond the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page as usize > self.total_pages
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.offset().saturating_add(self.per_page as usize)).min(self.total)
    }

    /// Page links for the pager.
    ///
    /// Shows every page when they fit in `max_visible`; otherwise the first and
    /// last page are always shown, with a window around the current page and
    /// ellipses standing in for the skipped runs.
    pub fn page_links(&self, max_visible: usize) -> Vec<PageLink> {
        let total = self.total_pages as i64;
        if self.total_pages <= max_visible {
            return (1..=total).map(PageLink::Page).collect();
        }

        let max_visible = max_visible as i64;
        let current = i64::from(self.page);
        let start = (current - (max_visible - 3) / 2).max(2);
        let end = (start + max_visible - 4).min(total - 1);

        let mut links = vec![PageLink::Page(1)];
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
        links.extend((start..=end).map(PageLink::Page));
        if end < total - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(total));
        links
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_PER_PAGE, 0)
    }
}

/// One entry in the pager.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageLink {
    Page(i64),
    Ellipsis,
}

/// A page of query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    /// Products on the requested page.
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl QueryResult {
    /// Create a result page.
    pub fn new(products: Vec<Product>, pagination: Pagination) -> Self {
        Self {
            products,
            pagination,
        }
    }

    /// Matches before pagination.
    pub fn total(&self) -> usize {
        self.pagination.total
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// Check if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get number of products on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }
}
