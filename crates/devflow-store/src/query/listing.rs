//! Immutable listing query specification.

use serde::Serialize;

use crate::types::{
    OffsetPagination, QuestionPredicate, QuestionSortField, SortBy, TagPredicate, TagSortField,
};

/// Everything an executor needs to produce one page of records.
///
/// Executors return at most [`ListingQuery::fetch_limit`] records, ordered by
/// the sort key and then by id ascending, after skipping
/// [`ListingQuery::offset`] matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingQuery<P, F> {
    /// Records must satisfy every clause.
    pub predicate: P,
    /// Primary sort key and direction.
    pub sort: SortBy<F>,
    /// Page window.
    pub pagination: OffsetPagination,
}

/// Listing query over the question collection.
pub type QuestionQuery = ListingQuery<QuestionPredicate, QuestionSortField>;

/// Listing query over the tag collection.
pub type TagQuery = ListingQuery<TagPredicate, TagSortField>;

impl<P, F> ListingQuery<P, F> {
    /// Creates a new listing query.
    pub fn new(predicate: P, sort: SortBy<F>, pagination: OffsetPagination) -> Self {
        Self {
            predicate,
            sort,
            pagination,
        }
    }

    /// Number of matching records to skip.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.pagination.offset
    }

    /// Number of records to fetch, one past the page size.
    #[inline]
    pub fn fetch_limit(&self) -> i64 {
        self.pagination.fetch_limit()
    }

    /// `offset` and `fetch_limit` as slice bounds for in-process executors.
    pub(crate) fn window(&self) -> (usize, usize) {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.fetch_limit()).unwrap_or(usize::MAX);
        (skip, take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionFilter;

    #[test]
    fn query_window() {
        let filter = QuestionFilter::Newest;
        let query = QuestionQuery::new(
            QuestionPredicate::new(None, filter),
            filter.sort_by(),
            OffsetPagination::from_page(3, 2),
        );

        assert_eq!(query.offset(), 4);
        assert_eq!(query.fetch_limit(), 3);
        assert_eq!(query.window(), (4, 3));
    }
}
