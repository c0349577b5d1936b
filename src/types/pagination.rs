//! Pagination types for the pickup point list endpoint.

use serde::Deserialize;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Validate page/limit bounds before any query executes.
    pub fn validate(&self) -> AppResult<()> {
        if self.page < 1 {
            return Err(AppError::validation("page must be >= 1"));
        }
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PaginationParams::default().validate().is_ok());
    }

    #[test]
    fn page_zero_rejected() {
        let params = PaginationParams { page: 0, limit: 10 };
        assert!(params.validate().is_err());
    }

    #[test]
    fn limit_bounds_enforced() {
        assert!(PaginationParams { page: 1, limit: 0 }.validate().is_err());
        assert!(PaginationParams { page: 1, limit: 31 }.validate().is_err());
        assert!(PaginationParams { page: 1, limit: 30 }.validate().is_ok());
    }

    #[test]
    fn offset_is_zero_based() {
        let params = PaginationParams { page: 3, limit: 10 };
        assert_eq!(params.offset(), 20);
    }
}
