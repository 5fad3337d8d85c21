//! Tag model for listing operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::tags;

/// Tag record as stored in the tag collection.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// Number of questions referencing the tag.
    pub questions: i32,
    /// Timestamp when the tag was created.
    pub created_at: Timestamp,
}

impl Tag {
    /// Returns the creation time as a plain [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

/// Data for creating a new tag.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTag {
    /// Tag identifier.
    pub id: Option<Uuid>,
    /// Tag name.
    pub name: String,
    /// Reference count.
    pub questions: Option<i32>,
    /// Creation timestamp.
    pub created_at: Option<Timestamp>,
}

impl NewTag {
    /// Creates a new tag with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the reference count.
    pub fn with_questions(mut self, questions: i32) -> Self {
        self.questions = Some(questions);
        self
    }

    pub(crate) fn into_tag(self) -> Tag {
        Tag {
            id: self.id.unwrap_or_else(Uuid::now_v7),
            name: self.name,
            questions: self.questions.unwrap_or_default(),
            created_at: self
                .created_at
                .unwrap_or_else(|| jiff::Timestamp::now().into()),
        }
    }
}
