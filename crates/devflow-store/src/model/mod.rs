//! Record models for the question and tag collections.
//!
//! Models are read by the listing executors and written only through
//! [`DocumentWriter`](crate::query::DocumentWriter) when seeding a store.

mod question;
mod tag;

pub use question::{NewQuestion, Question};
pub use tag::{NewTag, Tag};
