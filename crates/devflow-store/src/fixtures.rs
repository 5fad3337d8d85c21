//! JSON fixtures for seeding a document store.
//!
//! ```json
//! {
//!   "tags": [{ "name": "react", "questions": 50 }],
//!   "questions": [{ "title": "How to use React hooks?", "tags": ["react"], "upvotes": 50 }]
//! }
//! ```
//!
//! Questions reference tags by name. A tag without an explicit `questions`
//! count gets the number of fixture questions that reference it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::model::{NewQuestion, NewTag};
use crate::query::DocumentWriter;
use crate::{StoreError, StoreResult, TRACING_TARGET_FIXTURES};

/// Tag entry of a fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureTag {
    /// Tag name, unique within the file.
    pub name: String,
    /// Explicit reference count.
    #[serde(default)]
    pub questions: Option<i32>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

/// Question entry of a fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureQuestion {
    /// Question title.
    pub title: String,
    /// Question body text.
    #[serde(default)]
    pub content: String,
    /// Names of declared tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author account.
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub views: i32,
    #[serde(default)]
    pub upvotes: i32,
    #[serde(default)]
    pub downvotes: i32,
    #[serde(default)]
    pub answers: i32,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

/// A parsed fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub tags: Vec<FixtureTag>,
    #[serde(default)]
    pub questions: Vec<FixtureQuestion>,
}

/// Number of records a fixture application inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixturesReport {
    pub tags: usize,
    pub questions: usize,
}

impl Fixtures {
    /// Parses fixtures from a JSON string.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::Fixture(format!("invalid fixture JSON: {e}").into()))
    }

    /// Reads and parses a fixture file.
    pub async fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::Fixture(format!("cannot read {}: {e}", path.display()).into())
        })?;

        Self::from_json(&json)
    }

    /// Inserts every tag, then every question with its tag names resolved.
    ///
    /// Unknown or duplicated tag names are rejected before anything is written.
    pub async fn apply<W: DocumentWriter>(&self, writer: &W) -> StoreResult<FixturesReport> {
        let references = self.reference_counts()?;
        let mut tag_ids: HashMap<&str, Uuid> = HashMap::with_capacity(self.tags.len());

        for fixture in &self.tags {
            let new_tag = NewTag {
                id: None,
                name: fixture.name.clone(),
                questions: Some(fixture.questions.unwrap_or_else(|| {
                    references.get(fixture.name.as_str()).copied().unwrap_or(0)
                })),
                created_at: fixture.created_at.map(Into::into),
            };

            let tag = writer.insert_tag(new_tag).await?;
            tag_ids.insert(fixture.name.as_str(), tag.id);
        }

        for fixture in &self.questions {
            let tags = fixture
                .tags
                .iter()
                .filter_map(|name| tag_ids.get(name.as_str()).copied())
                .collect();

            let new_question = NewQuestion {
                id: None,
                title: fixture.title.clone(),
                content: fixture.content.clone(),
                tags,
                author_id: fixture.author_id,
                views: Some(fixture.views),
                upvotes: Some(fixture.upvotes),
                downvotes: Some(fixture.downvotes),
                answers: Some(fixture.answers),
                created_at: fixture.created_at.map(Into::into),
            };

            writer.insert_question(new_question).await?;
        }

        let report = FixturesReport {
            tags: self.tags.len(),
            questions: self.questions.len(),
        };

        tracing::info!(
            target: TRACING_TARGET_FIXTURES,
            tags = report.tags,
            questions = report.questions,
            "Fixtures applied"
        );

        Ok(report)
    }

    fn reference_counts(&self) -> StoreResult<HashMap<&str, i32>> {
        let mut counts: HashMap<&str, i32> = HashMap::with_capacity(self.tags.len());
        let mut folded: HashSet<String> = HashSet::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !folded.insert(tag.name.to_lowercase()) {
                return Err(StoreError::Fixture(
                    format!("tag {:?} is declared twice", tag.name).into(),
                ));
            }
            counts.insert(tag.name.as_str(), 0);
        }

        for question in &self.questions {
            for name in &question.tags {
                let Some(count) = counts.get_mut(name.as_str()) else {
                    return Err(StoreError::Fixture(
                        format!(
                            "question {:?} references undeclared tag {:?}",
                            question.title, name
                        )
                        .into(),
                    ));
                };
                *count += 1;
            }
        }

        Ok(counts)
    }
}
