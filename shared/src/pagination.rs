//! Pagination envelope for list endpoints

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside paginated data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// A page of records plus its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Build a page envelope; `total_pages` is at least 1 even for empty sets.
    pub fn new(data: Vec<T>, page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if total > 0 {
            (total + page_size - 1) / page_size
        } else {
            1
        };
        Self {
            data,
            pagination: Pagination {
                page,
                page_size,
                total,
                total_pages,
            },
        }
    }
}

/// Common query parameters for paginated list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageQuery {
    /// Clamp to sane bounds and return (limit, offset) for SQL.
    pub fn limit_offset(&self) -> (i64, i64) {
        let page = self.page.max(1);
        let page_size = self.page_size.clamp(1, 200);
        (page_size, (page - 1) * page_size)
    }
}
