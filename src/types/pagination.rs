//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER, MAX_PAGE_SIZE,
};

/// Listing query parameters. Pages are 0-indexed; sort parameters use the
/// camelCase names of the public contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default = "default_sort_by", rename = "sortBy")]
    pub sort_by: String,
    #[serde(default = "default_sort_order", rename = "sortOrder")]
    pub sort_order: String,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

fn default_sort_order() -> String {
    DEFAULT_SORT_ORDER.to_string()
}

impl ListParams {
    /// Page size capped at the maximum
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// True when the listing should be sorted descending.
    /// Anything other than DESC (case-insensitive) sorts ascending.
    pub fn descending(&self) -> bool {
        self.sort_order.eq_ignore_ascii_case("desc")
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, size: u64, total: u64) -> Self {
        let total_pages = if size > 0 { total.div_ceil(size) } else { 0 };

        Self {
            data,
            meta: PaginationMeta {
                page,
                size,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied_for_missing_parameters() {
        let params: ListParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.page, 0);
        assert_eq!(params.size, 10);
        assert_eq!(params.sort_by, "id");
        assert_eq!(params.sort_order, "ASC");
        assert!(!params.descending());
    }

    #[test]
    fn camel_case_sort_parameters_deserialize() {
        let params: ListParams =
            serde_json::from_str(r#"{"page":2,"size":5,"sortBy":"username","sortOrder":"desc"}"#)
                .unwrap();

        assert_eq!(params.page, 2);
        assert_eq!(params.sort_by, "username");
        assert!(params.descending());
    }

    #[test]
    fn limit_is_capped() {
        let params: ListParams = serde_json::from_str(r#"{"size":5000}"#).unwrap();
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<crate::domain::UserResponse> = Paginated::new(vec![], 0, 10, 21);
        assert_eq!(page.meta.total_pages, 3);
    }
}
