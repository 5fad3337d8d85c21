//! Question response types.

use devflow_store::model::{Question, Tag};
use devflow_store::types::OffsetPage;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::QuestionListing;

/// Tag attached to a listed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    /// Tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
}

impl From<Tag> for TagRef {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Question as returned by the listing endpoints.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    /// Question identifier.
    pub id: Uuid,
    /// Question title.
    pub title: String,
    /// Question body text.
    pub content: String,
    /// Tags attached to the question.
    pub tags: Vec<TagRef>,
    /// Account that asked the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    /// Number of views.
    pub views: i32,
    /// Number of upvotes.
    pub upvotes: i32,
    /// Number of downvotes.
    pub downvotes: i32,
    /// Number of answers.
    pub answers: i32,
    /// When the question was asked.
    pub created_at: Timestamp,
}

impl QuestionItem {
    /// Creates a response item from a question and its resolved tags.
    pub fn from_model(question: Question, tags: Vec<Tag>) -> Self {
        let created_at = question.created_at();
        Self {
            id: question.id,
            title: question.title,
            content: question.content,
            tags: tags.into_iter().map(TagRef::from).collect(),
            author_id: question.author_id,
            views: question.views,
            upvotes: question.upvotes,
            downvotes: question.downvotes,
            answers: question.answers,
            created_at,
        }
    }
}

impl From<QuestionListing> for QuestionItem {
    fn from(listing: QuestionListing) -> Self {
        Self::from_model(listing.question, listing.tags)
    }
}

/// Page of listed questions.
pub type QuestionsPage = OffsetPage<QuestionItem>;
