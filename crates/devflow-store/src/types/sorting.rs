//! Sorting options for listing queries.
//!
//! Every listing sorts by its primary key first and breaks ties by record id
//! in ascending order, so page boundaries are stable.

use std::cmp::Ordering;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Sort order direction.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortOrder {
    /// Ascending order (oldest first, smallest first).
    Asc,
    /// Descending order (newest first, largest first).
    #[default]
    Desc,
}

impl SortOrder {
    /// Applies the direction to an ascending comparison.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Generic sort specification with field and order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SortBy<F> {
    /// The field to sort by.
    pub field: F,
    /// The sort order direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl<F: Default> Default for SortBy<F> {
    fn default() -> Self {
        Self {
            field: F::default(),
            order: SortOrder::default(),
        }
    }
}

impl<F> SortBy<F> {
    /// Creates a new sort specification with the given field and order.
    #[inline]
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Creates a new sort specification with ascending order.
    #[inline]
    pub fn asc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    /// Creates a new sort specification with descending order.
    #[inline]
    pub fn desc(field: F) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }

    /// Replaces the direction when an override is present.
    #[inline]
    pub fn with_order(mut self, order: Option<SortOrder>) -> Self {
        if let Some(order) = order {
            self.order = order;
        }
        self
    }

    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(&self) -> bool {
        matches!(self.order, SortOrder::Asc)
    }

    /// Returns whether the sort order is descending.
    #[inline]
    pub fn is_desc(&self) -> bool {
        matches!(self.order, SortOrder::Desc)
    }
}

/// Fields available for sorting questions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum QuestionSortField {
    /// Sort by creation date.
    #[default]
    CreatedAt,
    /// Sort by upvote count.
    Upvotes,
}

/// Sorting specification for questions.
pub type QuestionSortBy = SortBy<QuestionSortField>;

/// Fields available for sorting tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TagSortField {
    /// Sort by number of referencing questions.
    #[default]
    Questions,
}

/// Sorting specification for tags.
pub type TagSortBy = SortBy<TagSortField>;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!(SortOrder::from_str("asc").ok(), Some(SortOrder::Asc));
        assert_eq!(SortOrder::from_str("DESC").ok(), Some(SortOrder::Desc));
        assert!(SortOrder::from_str("sideways").is_err());
    }

    #[test]
    fn sort_order_applies_direction() {
        assert_eq!(SortOrder::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortOrder::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn sort_by_override() {
        let sort = QuestionSortBy::desc(QuestionSortField::Upvotes);
        assert!(sort.with_order(None).is_desc());
        assert!(sort.with_order(Some(SortOrder::Asc)).is_asc());
    }

    #[test]
    fn sort_by_defaults_to_newest_first() {
        let sort = QuestionSortBy::default();
        assert_eq!(sort.field, QuestionSortField::CreatedAt);
        assert!(sort.is_desc());
    }
}
