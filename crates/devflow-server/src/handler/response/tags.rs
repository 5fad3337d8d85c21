//! Tag response types.

use devflow_store::model::Tag;
use devflow_store::types::OffsetPage;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag as returned by the listing endpoints.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagItem {
    /// Tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// Number of questions referencing the tag.
    pub questions: i32,
    /// When the tag was created.
    pub created_at: Timestamp,
}

impl TagItem {
    /// Creates a response item from a tag record.
    pub fn from_model(tag: Tag) -> Self {
        let created_at = tag.created_at();
        Self {
            id: tag.id,
            name: tag.name,
            questions: tag.questions,
            created_at,
        }
    }
}

/// Page of listed tags.
pub type TagsPage = OffsetPage<TagItem>;
