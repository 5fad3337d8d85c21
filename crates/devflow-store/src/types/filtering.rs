//! Filtering options for listing queries.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use super::{QuestionSortBy, QuestionSortField, SortBy, TagSortBy, TagSortField};
use crate::TRACING_TARGET_QUERY;

/// Named question listing views.
///
/// A filter picks the sort key and, for [`QuestionFilter::Unanswered`], narrows
/// the predicate.
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
    AsRefStr,
    IntoStaticStr
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestionFilter {
    /// Most recent questions first.
    #[default]
    Newest,
    /// Questions without answers, most recent first.
    Unanswered,
    /// Most upvoted questions first.
    Popular,
}

impl QuestionFilter {
    /// Parses a filter value, treating unknown values as the default view.
    pub fn parse_lenient(value: &str) -> Self {
        Self::from_str(value).unwrap_or_else(|_| {
            tracing::debug!(
                target: TRACING_TARGET_QUERY,
                filter = value,
                "Unknown question filter, falling back to the default view"
            );
            Self::default()
        })
    }

    /// Returns the sort specification the view lists by.
    pub fn sort_by(self) -> QuestionSortBy {
        match self {
            Self::Newest | Self::Unanswered => SortBy::desc(QuestionSortField::CreatedAt),
            Self::Popular => SortBy::desc(QuestionSortField::Upvotes),
        }
    }

    /// Returns whether the view only lists questions without answers.
    #[inline]
    pub fn unanswered_only(self) -> bool {
        matches!(self, Self::Unanswered)
    }
}

/// Case-insensitive literal substring search term.
///
/// Empty terms are never constructed, so an absent term means "match all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term, returning `None` for an empty string.
    pub fn new(term: impl Into<String>) -> Option<Self> {
        let term = term.into();
        (!term.is_empty()).then_some(Self(term))
    }

    /// Returns the raw term.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether `haystack` contains the term, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }

    /// Returns an `ILIKE` pattern matching the term literally anywhere.
    ///
    /// `%`, `_` and the backslash escape character are escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Predicate for question listings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct QuestionPredicate {
    /// Matched against the title or the body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchTerm>,
    /// Only list questions with zero answers.
    #[serde(default)]
    pub unanswered_only: bool,
}

impl QuestionPredicate {
    /// Creates the predicate for a search term and a listing view.
    pub fn new(search: Option<&str>, filter: QuestionFilter) -> Self {
        Self {
            search: search.and_then(SearchTerm::new),
            unanswered_only: filter.unanswered_only(),
        }
    }

    /// Returns whether the predicate matches every question.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && !self.unanswered_only
    }
}

/// Predicate for tag listings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TagPredicate {
    /// Matched against the tag name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchTerm>,
}

impl TagPredicate {
    /// Creates the predicate for a search term.
    pub fn new(search: Option<&str>) -> Self {
        Self {
            search: search.and_then(SearchTerm::new),
        }
    }

    /// Returns the sort specification tags are listed by.
    pub fn sort_by(&self) -> TagSortBy {
        SortBy::desc(TagSortField::Questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_known_views() {
        assert_eq!(QuestionFilter::parse_lenient("newest"), QuestionFilter::Newest);
        assert_eq!(
            QuestionFilter::parse_lenient("unanswered"),
            QuestionFilter::Unanswered
        );
        assert_eq!(QuestionFilter::parse_lenient("popular"), QuestionFilter::Popular);
    }

    #[test]
    fn filter_falls_back_on_unknown_values() {
        assert_eq!(QuestionFilter::parse_lenient("trending"), QuestionFilter::Newest);
        assert_eq!(QuestionFilter::parse_lenient(""), QuestionFilter::Newest);
    }

    #[test]
    fn filter_sort_keys() {
        assert_eq!(
            QuestionFilter::Popular.sort_by().field,
            QuestionSortField::Upvotes
        );
        assert_eq!(
            QuestionFilter::Unanswered.sort_by().field,
            QuestionSortField::CreatedAt
        );
        assert!(QuestionFilter::Newest.sort_by().is_desc());
    }

    #[test]
    fn empty_search_is_absent() {
        assert!(SearchTerm::new("").is_none());
        assert!(QuestionPredicate::new(Some(""), QuestionFilter::Newest).is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let term = SearchTerm::new("REACT").expect("non-empty term");
        assert!(term.matches("How to use React hooks?"));
        assert!(!term.matches("Node.js best practices"));
    }

    #[test]
    fn search_matches_wildcards_literally() {
        let term = SearchTerm::new("100%").expect("non-empty term");
        assert!(term.matches("Is 100% coverage worth it?"));
        assert!(!term.matches("Is 1000 coverage worth it?"));
        assert_eq!(term.like_pattern(), "%100\\%%");

        let term = SearchTerm::new("a_b\\c").expect("non-empty term");
        assert_eq!(term.like_pattern(), "%a\\_b\\\\c%");
    }

    #[test]
    fn unanswered_predicate() {
        let predicate = QuestionPredicate::new(Some("js"), QuestionFilter::Unanswered);
        assert!(predicate.unanswered_only);
        assert_eq!(predicate.search.as_ref().map(SearchTerm::as_str), Some("js"));
    }
}
