//! Listing query specification and the executors that run it.
//!
//! A listing is described once by an immutable [`ListingQuery`] value and
//! handed to a [`DocumentStore`] in a single find-many call. PostgreSQL
//! connections run listings through the [`QuestionRepository`] and
//! [`TagRepository`] traits.

mod document_store;
mod listing;
mod question;
mod tag;

pub use document_store::{DocumentStore, DocumentWriter};
pub use listing::{ListingQuery, QuestionQuery, TagQuery};
pub use question::QuestionRepository;
pub use tag::TagRepository;
