//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Page number, defaulting to 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Page size, defaulting to 5.
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(5)
    }

    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple for SQL queries.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let per_page = self.per_page();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&per_page) {
            return Err("per_page must be between 1 and 100".to_string());
        }

        // Widen before multiplying; u32::MAX * 100 overflows in u32.
        let offset = (page as i64 - 1) * per_page as i64;
        let limit = per_page as i64;

        Ok((offset, limit))
    }
}

/// Pagination metadata returned alongside a non-empty page of results.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub pages: u32,
    pub total_count: i64,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    /// Computes metadata for `page` of size `per_page` over `total` rows.
    pub fn new(page: u32, per_page: u32, total: i64) -> Self {
        let pages = (total.max(0) as u64).div_ceil(per_page as u64) as u32;
        let has_prev = page > 1;
        let has_next = page < pages;

        Self {
            page,
            pages,
            total_count: total,
            prev_page: has_prev.then(|| page - 1),
            next_page: has_next.then(|| page + 1),
            has_next,
            has_prev,
        }
    }
}
