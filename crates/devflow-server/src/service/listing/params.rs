//! Untrusted listing parameters and their validation.

use std::str::FromStr;

use devflow_store::query::{QuestionQuery, TagQuery};
use devflow_store::types::{
    DEFAULT_PAGE_SIZE, OffsetPagination, QuestionFilter, QuestionPredicate, SortOrder,
    TagPredicate,
};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use validator::{Validate, ValidationErrors};

use super::TRACING_TARGET;
use super::violation::{InvalidParams, Violation};

/// Listing parameters exactly as the client sent them.
///
/// Every field keeps its raw JSON value so that type errors can be reported
/// alongside range errors instead of failing deserialization. An explicit
/// `null` is kept as a value and rejected; an absent field takes its default.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    /// 1-based page number, defaults to 1.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub page: Option<Value>,
    /// Number of records per page, defaults to 10.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<i64>")]
    pub page_size: Option<Value>,
    /// Case-insensitive substring searched for in titles and bodies.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    pub query: Option<Value>,
    /// Named listing view: `newest`, `unanswered` or `popular`.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<QuestionFilter>")]
    pub filter: Option<Value>,
    /// Direction override for the primary sort key: `asc` or `desc`.
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<SortOrder>")]
    pub sort: Option<Value>,
}

/// Keeps an explicit `null` distinguishable from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Page window checked by the `validator` range rules.
#[derive(Debug, Clone, Copy, Validate)]
struct PageWindow {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    page: i64,
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    page_size: i64,
}

impl ListingParams {
    /// Creates parameters for the given page window.
    pub fn for_page(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(Value::from(page)),
            page_size: Some(Value::from(page_size)),
            ..Self::default()
        }
    }

    /// Sets the search term.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(Value::String(query.into()));
        self
    }

    /// Sets the listing view.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(Value::String(filter.into()));
        self
    }

    /// Sets the sort direction override.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(Value::String(sort.into()));
        self
    }

    /// Reads numeric strings in `page` and `pageSize` as numbers.
    ///
    /// Query strings carry every value as text; a JSON body keeps its types
    /// and must not go through this.
    pub fn coerce_query_strings(mut self) -> Self {
        self.page = self.page.map(coerce_number);
        self.page_size = self.page_size.map(coerce_number);
        self
    }

    /// Checks every parameter and collects all violations in field order.
    pub fn validate(&self) -> Result<ListingRequest, InvalidParams> {
        let mut violations = Vec::new();

        let page = integer_field("page", self.page.as_ref());
        let page_size = integer_field("pageSize", self.page_size.as_ref());
        let query = string_field("query", self.query.as_ref());
        let filter = string_field("filter", self.filter.as_ref());
        let sort = string_field("sort", self.sort.as_ref());

        let window = PageWindow {
            page: page.as_ref().ok().copied().flatten().unwrap_or(1),
            page_size: page_size
                .as_ref()
                .ok()
                .copied()
                .flatten()
                .unwrap_or(DEFAULT_PAGE_SIZE),
        };
        let range_errors = window.validate().err();

        match &page {
            Err(violation) => violations.push(violation.clone()),
            Ok(_) => violations.extend(range_violations(&range_errors, "page", "page")),
        }
        match &page_size {
            Err(violation) => violations.push(violation.clone()),
            Ok(_) => violations.extend(range_violations(&range_errors, "page_size", "pageSize")),
        }
        for field in [&query, &filter, &sort] {
            if let Err(violation) = field {
                violations.push(violation.clone());
            }
        }

        if !violations.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET,
                violations = violations.len(),
                "Listing parameters rejected"
            );
            return Err(InvalidParams::new(violations));
        }

        Ok(ListingRequest {
            page: window.page,
            page_size: window.page_size,
            query: query.ok().flatten(),
            filter: filter.ok().flatten(),
            sort: sort.ok().flatten(),
        })
    }
}

/// Validated listing parameters with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// 1-based page number.
    pub page: i64,
    /// Number of records per page.
    pub page_size: i64,
    /// Search term, if any.
    pub query: Option<String>,
    /// Raw listing view name, if any.
    pub filter: Option<String>,
    /// Raw sort direction, if any.
    pub sort: Option<String>,
}

impl ListingRequest {
    /// Page window of the request.
    pub fn pagination(&self) -> OffsetPagination {
        OffsetPagination::from_page(self.page, self.page_size)
    }

    /// Listing view, falling back to the default for unknown names.
    pub fn question_filter(&self) -> QuestionFilter {
        self.filter
            .as_deref()
            .map(QuestionFilter::parse_lenient)
            .unwrap_or_default()
    }

    /// Sort direction override; unknown values are ignored.
    pub fn sort_order(&self) -> Option<SortOrder> {
        let raw = self.sort.as_deref()?;
        match SortOrder::from_str(raw) {
            Ok(order) => Some(order),
            Err(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    sort = raw,
                    "Unknown sort direction ignored"
                );
                None
            }
        }
    }

    /// Builds the immutable question listing query.
    pub fn question_query(&self) -> QuestionQuery {
        let filter = self.question_filter();
        QuestionQuery::new(
            QuestionPredicate::new(self.query.as_deref(), filter),
            filter.sort_by().with_order(self.sort_order()),
            self.pagination(),
        )
    }

    /// Builds the immutable tag listing query.
    pub fn tag_query(&self) -> TagQuery {
        let predicate = TagPredicate::new(self.query.as_deref());
        let sort = predicate.sort_by().with_order(self.sort_order());
        TagQuery::new(predicate, sort, self.pagination())
    }
}

fn integer_field(field: &'static str, value: Option<&Value>) -> Result<Option<i64>, Violation> {
    match value {
        None => Ok(None),
        Some(Value::Number(number)) => integer_value(number)
            .map(Some)
            .ok_or_else(|| Violation::not_an_integer(field)),
        Some(other) => Err(Violation::wrong_type(field, "number", other)),
    }
}

/// Reads a JSON number as an integer, saturating values beyond `i64`.
fn integer_value(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    if number.is_u64() {
        return Some(i64::MAX);
    }

    let value = number.as_f64()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn string_field(field: &'static str, value: Option<&Value>) -> Result<Option<String>, Violation> {
    match value {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(Violation::wrong_type(field, "string", other)),
    }
}

fn range_violations(
    errors: &Option<ValidationErrors>,
    field: &'static str,
    wire_name: &'static str,
) -> Vec<Violation> {
    let Some(errors) = errors else {
        return Vec::new();
    };

    errors
        .field_errors()
        .get(field)
        .map(|field_errors| {
            field_errors
                .iter()
                .filter_map(|error| error.message.clone())
                .map(|message| Violation::new(wire_name, message))
                .collect()
        })
        .unwrap_or_default()
}

fn coerce_number(value: Value) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    if let Ok(integer) = text.parse::<i64>() {
        return Value::from(integer);
    }

    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(value)
}
