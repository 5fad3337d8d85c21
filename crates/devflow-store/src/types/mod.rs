//! Pagination, sorting and filtering types the listing queries are built from.

mod filtering;
mod pagination;
mod sorting;

pub use filtering::{QuestionFilter, QuestionPredicate, SearchTerm, TagPredicate};
pub use pagination::{DEFAULT_PAGE_SIZE, OffsetPage, OffsetPagination};
pub use sorting::{QuestionSortBy, QuestionSortField, SortBy, SortOrder, TagSortBy, TagSortField};
