//! Pagination utilities shared by the service and HTTP layers
//!
//! `Pagination` is the 1-based request side, `Paging` is the metadata
//! returned next to a page of results.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_SIZE: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Zero-based page index as used by SeaORM's `fetch_page`.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        self.page_index().saturating_mul(self.size)
    }

    /// Build the response metadata for a result set of `total` rows.
    pub fn paging(&self, total: u64) -> Paging {
        Paging {
            current_page: self.page,
            size: self.size,
            total_page: total_pages(total, self.size),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, size: DEFAULT_SIZE } }
}

/// Paging metadata attached to list responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub current_page: u64,
    pub size: u64,
    pub total_page: u64,
}

/// `ceil(total / size)`; a zero size yields zero pages.
pub fn total_pages(total: u64, size: u64) -> u64 {
    if size == 0 { return 0; }
    total.div_ceil(size)
}
