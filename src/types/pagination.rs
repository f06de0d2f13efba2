//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, reusable across all list endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageRequest {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page, capped at the configured maximum
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper: `{data, page, lastPage, total}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub last_page: u64,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response; `last_page = ceil(total / page_size)`
    pub fn new(data: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        let last_page = if page_size > 0 {
            total.div_ceil(page_size)
        } else {
            0
        };

        Self {
            data,
            page,
            last_page,
            total,
        }
    }

    /// Map every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            last_page: self.last_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_ceiling_of_total_over_page_size() {
        let page = Paginated::new(vec![1, 2, 3], 1, 10, 31);
        assert_eq!(page.last_page, 4);

        let exact = Paginated::new(vec![1], 1, 10, 30);
        assert_eq!(exact.last_page, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], 1, 10, 0);
        assert_eq!(empty.last_page, 0);
        assert_eq!(empty.total, 0);
    }

    #[test]
    fn limit_is_capped_and_never_zero() {
        let oversized = PageRequest {
            page: 1,
            page_size: 10_000,
        };
        assert_eq!(oversized.limit(), MAX_PAGE_SIZE);

        let zero = PageRequest {
            page: 3,
            page_size: 0,
        };
        assert_eq!(zero.limit(), 1);
        assert_eq!(zero.offset(), 2);
    }

    #[test]
    fn offset_is_zero_based() {
        let request = PageRequest {
            page: 3,
            page_size: 20,
        };
        assert_eq!(request.offset(), 40);
    }
}
