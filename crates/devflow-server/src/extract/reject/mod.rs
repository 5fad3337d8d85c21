//! Enhanced request extractors with improved error handling.
//!
//! Drop-in replacements for their standard Axum counterparts that convert
//! rejections into the crate's HTTP error type.

pub mod enhanced_json;
pub mod enhanced_query;

pub use self::enhanced_json::Json;
pub use self::enhanced_query::Query;
