//! Rule violations collected while validating listing parameters.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// A single rule a listing parameter broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending parameter.
    pub field: &'static str,
    /// Client-facing description of the broken rule.
    pub message: Cow<'static, str>,
}

impl Violation {
    /// Creates a new violation for `field`.
    pub fn new(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The value had a different JSON type than the field accepts.
    pub fn wrong_type(field: &'static str, expected: &str, received: &Value) -> Self {
        Self::new(
            field,
            format!(
                "Invalid input: expected {}, received {}",
                expected,
                json_type_name(received)
            ),
        )
    }

    /// The value was a number with a fractional part.
    pub fn not_an_integer(field: &'static str) -> Self {
        Self::new(field, "Invalid input: expected int, received number")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violation found in one set of listing parameters, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct InvalidParams(Vec<Violation>);

impl InvalidParams {
    /// Wraps the collected violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Returns the collected violations.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Returns the aggregated message sent to clients.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InvalidParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidParams {}

/// Name of the JSON type of `value`, as reported in type violations.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
