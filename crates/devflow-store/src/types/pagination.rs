//! Offset-based pagination for listing queries.
//!
//! Pages are never counted: the executor is asked for one record
//! more than the page holds, and the presence of that extra record is what
//! `has_next` reports.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Offset-based pagination parameters for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of records the page holds.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates pagination from a 1-based page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        Self {
            limit: page_size,
            offset: (page - 1).saturating_mul(page_size),
        }
    }

    /// Number of records to fetch so that the next page can be detected.
    #[inline]
    pub fn fetch_limit(&self) -> i64 {
        self.limit.saturating_add(1)
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self::from_page(1, DEFAULT_PAGE_SIZE)
    }
}

/// Result of an offset-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Whether at least one more record matches past this page.
    pub has_next: bool,
}

impl<T> OffsetPage<T> {
    /// Creates a page from records fetched with [`OffsetPagination::fetch_limit`].
    ///
    /// Records past the page size are dropped and flip `has_next`.
    pub fn from_fetched(mut items: Vec<T>, pagination: &OffsetPagination) -> Self {
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        let has_next = items.len() > limit;
        items.truncate(limit);
        Self { items, has_next }
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> OffsetPage<U>
    where
        F: FnMut(T) -> U,
    {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_from_page() {
        let pagination = OffsetPagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = OffsetPagination::from_page(2, 20);
        assert_eq!(pagination.offset, 20);

        let pagination = OffsetPagination::from_page(3, 10);
        assert_eq!(pagination.offset, 20);
        assert_eq!(pagination.fetch_limit(), 11);
    }

    #[test]
    fn pagination_bounds_checking() {
        let pagination = OffsetPagination::from_page(0, 0);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_has_no_upper_page_size_cap() {
        let pagination = OffsetPagination::from_page(1, 5000);
        assert_eq!(pagination.limit, 5000);
        assert_eq!(pagination.fetch_limit(), 5001);
    }

    #[test]
    fn pagination_default() {
        let pagination = OffsetPagination::default();
        assert_eq!(pagination.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn page_from_fetched_with_extra_record() {
        let pagination = OffsetPagination::from_page(1, 2);
        let page = OffsetPage::from_fetched(vec![1, 2, 3], &pagination);
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_next);
    }

    #[test]
    fn page_from_fetched_exact_fit() {
        let pagination = OffsetPagination::from_page(1, 2);
        let page = OffsetPage::from_fetched(vec![1, 2], &pagination);
        assert_eq!(page.items, vec![1, 2]);
        assert!(!page.has_next);

        let page: OffsetPage<i32> = OffsetPage::from_fetched(vec![], &pagination);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn page_map_keeps_flag() {
        let pagination = OffsetPagination::from_page(1, 2);
        let page = OffsetPage::from_fetched(vec![1, 2, 3], &pagination).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert!(page.has_next);
    }
}
