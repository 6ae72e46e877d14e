//! Offset pagination shared by word listing and the per-user lists

use serde::{Deserialize, Serialize};

use super::validation::ValidationResult;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Validated page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// Applies defaults, caps `limit`, rejects non-positive or overflowing values
    pub fn parse(page: Option<i64>, limit: Option<i64>) -> Result<Self, ValidationResult> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let limit = limit.min(MAX_LIMIT);

        let mut result = ValidationResult::new();
        result.check(page > 0, "page", "must be greater than 0");
        result.check(limit > 0, "limit", "must be greater than 0");
        // page * limit bounds both the offset and the hasNext product
        result.check(page.checked_mul(limit).is_some(), "page", "is too large");
        result.into_result()?;

        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of results in the wire shape the dashboard expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total_docs: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, total_docs: i64, params: PageParams) -> Self {
        let total_pages = (total_docs + params.limit - 1) / params.limit;
        Self {
            results,
            total_docs,
            page: params.page,
            total_pages,
            has_next: params.page * params.limit < total_docs,
            has_prev: params.page > 1,
        }
    }

    /// Wraps a complete list as the only page
    pub fn single(results: Vec<T>) -> Self {
        let total_docs = results.len() as i64;
        Self {
            results,
            total_docs,
            page: 1,
            total_pages: 1,
            has_next: false,
            has_prev: false,
        }
    }
}
