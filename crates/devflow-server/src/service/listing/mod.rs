//! Listing query resolution for questions and tags.
//!
//! Untrusted [`ListingParams`] are validated into a [`ListingRequest`], shaped
//! into an immutable store query and executed once. Every sort breaks ties by
//! id ascending, and one record past the page is fetched to report `hasNext`.

mod error;
mod params;
mod resolver;
mod violation;

pub use error::ListingError;
pub use params::{ListingParams, ListingRequest};
pub use resolver::{ListingResolver, QuestionListing};
pub use violation::{InvalidParams, Violation};

/// Tracing target for listing resolution.
pub(crate) const TRACING_TARGET: &str = "devflow_server::service::listing";
