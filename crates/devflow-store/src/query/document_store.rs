//! Executor traits shared by every store backend.

use std::future::Future;

use uuid::Uuid;

use super::{QuestionQuery, TagQuery};
use crate::StoreResult;
use crate::model::{NewQuestion, NewTag, Question, Tag};

/// Read side of a document store.
///
/// Implementations must honour the whole [`ListingQuery`](super::ListingQuery):
/// filter by the predicate, sort by the key then by id ascending, skip
/// `offset` matches and return at most `fetch_limit` records.
pub trait DocumentStore {
    /// Runs a question listing.
    fn find_questions(
        &self,
        query: QuestionQuery,
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Runs a tag listing.
    fn find_tags(&self, query: TagQuery) -> impl Future<Output = StoreResult<Vec<Tag>>> + Send;

    /// Finds the tags with the given ids, in no particular order.
    fn find_tags_by_ids(
        &self,
        tag_ids: &[Uuid],
    ) -> impl Future<Output = StoreResult<Vec<Tag>>> + Send;

    /// Checks that the store can serve queries.
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Write side of a document store, used for seeding.
pub trait DocumentWriter {
    /// Inserts a new tag.
    fn insert_tag(&self, new_tag: NewTag) -> impl Future<Output = StoreResult<Tag>> + Send;

    /// Inserts a new question.
    fn insert_question(
        &self,
        new_question: NewQuestion,
    ) -> impl Future<Output = StoreResult<Question>> + Send;
}
