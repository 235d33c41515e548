//! Shared Types

use serde::Deserialize;
use shared::{AppError, AppResult};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Pagination query parameters (`?recordPerPage=&page=&startIndex=`)
///
/// Kept as raw strings: a bad `recordPerPage` or `page` falls back to its
/// default, a bad `startIndex` is a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

/// Resolved window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub fn window(&self) -> AppResult<PageWindow> {
        let limit = positive(self.record_per_page.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE);
        let page = positive(self.page.as_deref()).unwrap_or(1);

        let start = match self.start_index.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<u64>()
                .map_err(|_| AppError::validation(format!("invalid startIndex: {raw:?}")))?,
            _ => (page - 1).saturating_mul(limit),
        };

        Ok(PageWindow { start, limit })
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rpp: Option<&str>, page: Option<&str>, start: Option<&str>) -> PaginationParams {
        PaginationParams {
            record_per_page: rpp.map(String::from),
            page: page.map(String::from),
            start_index: start.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let w = params(None, None, None).window().unwrap();
        assert_eq!(w, PageWindow { start: 0, limit: 10 });
    }

    #[test]
    fn test_bad_sizes_fall_back() {
        let w = params(Some("abc"), Some("0"), None).window().unwrap();
        assert_eq!(w, PageWindow { start: 0, limit: 10 });
        let w = params(Some("-3"), Some("x"), None).window().unwrap();
        assert_eq!(w, PageWindow { start: 0, limit: 10 });
    }

    #[test]
    fn test_page_offsets() {
        let w = params(Some("5"), Some("3"), None).window().unwrap();
        assert_eq!(w, PageWindow { start: 10, limit: 5 });
    }

    #[test]
    fn test_explicit_start_index() {
        let w = params(Some("5"), Some("3"), Some("2")).window().unwrap();
        assert_eq!(w, PageWindow { start: 2, limit: 5 });
        assert!(params(None, None, Some("two")).window().is_err());
    }
}
