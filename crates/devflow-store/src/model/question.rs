//! Question model for listing operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::questions;

/// Question record as stored in the question collection.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Question {
    /// Unique question identifier.
    pub id: Uuid,
    /// Question title.
    pub title: String,
    /// Question body text.
    pub content: String,
    /// Identifiers of the tags attached to the question.
    pub tags: Vec<Uuid>,
    /// Account that asked the question.
    pub author_id: Option<Uuid>,
    /// Number of times the question was viewed.
    pub views: i32,
    /// Number of upvotes, the popularity measure.
    pub upvotes: i32,
    /// Number of downvotes.
    pub downvotes: i32,
    /// Number of answers posted.
    pub answers: i32,
    /// Timestamp when the question was asked.
    pub created_at: Timestamp,
}

impl Question {
    /// Returns whether the question has no answers yet.
    #[inline]
    pub fn is_unanswered(&self) -> bool {
        self.answers == 0
    }

    /// Returns the creation time as a plain [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

/// Data for creating a new question.
///
/// Fields left as `None` take the column defaults.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewQuestion {
    /// Question identifier.
    pub id: Option<Uuid>,
    /// Question title.
    pub title: String,
    /// Question body text.
    pub content: String,
    /// Tag identifiers.
    pub tags: Vec<Uuid>,
    /// Author account.
    pub author_id: Option<Uuid>,
    /// View count.
    pub views: Option<i32>,
    /// Upvote count.
    pub upvotes: Option<i32>,
    /// Downvote count.
    pub downvotes: Option<i32>,
    /// Answer count.
    pub answers: Option<i32>,
    /// Creation timestamp.
    pub created_at: Option<Timestamp>,
}

impl NewQuestion {
    /// Creates a new question with the given title and body.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Attaches tag identifiers.
    pub fn with_tags(mut self, tags: Vec<Uuid>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the upvote count.
    pub fn with_upvotes(mut self, upvotes: i32) -> Self {
        self.upvotes = Some(upvotes);
        self
    }

    /// Sets the answer count.
    pub fn with_answers(mut self, answers: i32) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: jiff::Timestamp) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Materializes the record the way the column defaults would.
    pub(crate) fn into_question(self) -> Question {
        Question {
            id: self.id.unwrap_or_else(Uuid::now_v7),
            title: self.title,
            content: self.content,
            tags: self.tags,
            author_id: self.author_id,
            views: self.views.unwrap_or_default(),
            upvotes: self.upvotes.unwrap_or_default(),
            downvotes: self.downvotes.unwrap_or_default(),
            answers: self.answers.unwrap_or_default(),
            created_at: self
                .created_at
                .unwrap_or_else(|| jiff::Timestamp::now().into()),
        }
    }
}
