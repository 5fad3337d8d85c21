//! Enhanced HTTP request extractors with improved error handling.
//!
//! - [`Json`] - JSON deserialization with envelope-shaped rejections
//! - [`Query`] - Query parameter extraction with enhanced error messages
//!
//! Both reject with the crate's HTTP [`Error`], so malformed requests get the
//! same `{ success, error }` envelope as every other failure.
//!
//! [`Error`]: crate::handler::Error

// Request Data Extraction
pub mod reject;

pub use crate::extract::reject::{Json, Query};
