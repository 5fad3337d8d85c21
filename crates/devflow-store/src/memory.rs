//! In-process document store.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{NewQuestion, NewTag, Question, Tag};
use crate::query::{DocumentStore, DocumentWriter, QuestionQuery, TagQuery};
use crate::types::{QuestionSortField, SortBy, TagSortField};
use crate::{StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Document store holding both collections in memory.
///
/// Cloning is cheap and every clone shares the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryCollections>>,
}

#[derive(Debug, Default)]
struct MemoryCollections {
    questions: Vec<Question>,
    tags: Vec<Tag>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of questions and tags held.
    pub async fn len(&self) -> (usize, usize) {
        let collections = self.inner.read().await;
        (collections.questions.len(), collections.tags.len())
    }

    /// Returns whether both collections are empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == (0, 0)
    }
}

fn compare_questions(sort: &SortBy<QuestionSortField>, a: &Question, b: &Question) -> Ordering {
    let primary = match sort.field {
        QuestionSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        QuestionSortField::Upvotes => a.upvotes.cmp(&b.upvotes),
    };

    sort.order.apply(primary).then_with(|| a.id.cmp(&b.id))
}

fn compare_tags(sort: &SortBy<TagSortField>, a: &Tag, b: &Tag) -> Ordering {
    let primary = match sort.field {
        TagSortField::Questions => a.questions.cmp(&b.questions),
    };

    sort.order.apply(primary).then_with(|| a.id.cmp(&b.id))
}

impl DocumentStore for MemoryStore {
    async fn find_questions(&self, query: QuestionQuery) -> StoreResult<Vec<Question>> {
        let collections = self.inner.read().await;
        let predicate = &query.predicate;

        let mut matched: Vec<&Question> = collections
            .questions
            .iter()
            .filter(|q| !predicate.unanswered_only || q.is_unanswered())
            .filter(|q| {
                predicate
                    .search
                    .as_ref()
                    .is_none_or(|term| term.matches(&q.title) || term.matches(&q.content))
            })
            .collect();

        matched.sort_by(|a, b| compare_questions(&query.sort, a, b));

        let (skip, take) = query.window();
        let records: Vec<Question> = matched.into_iter().skip(skip).take(take).cloned().collect();

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            backend = "memory",
            fetched = records.len(),
            "Question listing executed"
        );

        Ok(records)
    }

    async fn find_tags(&self, query: TagQuery) -> StoreResult<Vec<Tag>> {
        let collections = self.inner.read().await;

        let mut matched: Vec<&Tag> = collections
            .tags
            .iter()
            .filter(|t| {
                query
                    .predicate
                    .search
                    .as_ref()
                    .is_none_or(|term| term.matches(&t.name))
            })
            .collect();

        matched.sort_by(|a, b| compare_tags(&query.sort, a, b));

        let (skip, take) = query.window();
        let records: Vec<Tag> = matched.into_iter().skip(skip).take(take).cloned().collect();

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            backend = "memory",
            fetched = records.len(),
            "Tag listing executed"
        );

        Ok(records)
    }

    async fn find_tags_by_ids(&self, tag_ids: &[Uuid]) -> StoreResult<Vec<Tag>> {
        let collections = self.inner.read().await;
        let tags = collections
            .tags
            .iter()
            .filter(|t| tag_ids.contains(&t.id))
            .cloned()
            .collect();

        Ok(tags)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

impl DocumentWriter for MemoryStore {
    async fn insert_tag(&self, new_tag: NewTag) -> StoreResult<Tag> {
        let mut collections = self.inner.write().await;
        let tag = new_tag.into_tag();

        if collections.tags.iter().any(|t| t.id == tag.id) {
            return Err(StoreError::Unexpected(
                format!("tag {} already exists", tag.id).into(),
            ));
        }

        // Tag names are unique ignoring case, as on the `tags_name_unique_idx` index.
        if let Some(existing) = collections
            .tags
            .iter()
            .find(|t| t.name.to_lowercase() == tag.name.to_lowercase())
        {
            return Err(StoreError::Unexpected(
                format!("tag {:?} conflicts with existing tag {:?}", tag.name, existing.name)
                    .into(),
            ));
        }

        collections.tags.push(tag.clone());
        Ok(tag)
    }

    async fn insert_question(&self, new_question: NewQuestion) -> StoreResult<Question> {
        let mut collections = self.inner.write().await;
        let question = new_question.into_question();

        if collections.questions.iter().any(|q| q.id == question.id) {
            return Err(StoreError::Unexpected(
                format!("question {} already exists", question.id).into(),
            ));
        }

        collections.questions.push(question.clone());
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::types::{
        OffsetPagination, QuestionFilter, QuestionPredicate, SortOrder, TagPredicate,
    };

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        let questions = [
            ("How to use React hooks?", "useState", 50, 5, "2024-01-01T00:00:00Z"),
            ("JavaScript async/await explained", "Promises", 100, 0, "2024-02-01T00:00:00Z"),
            ("Node.js best practices", "Structure", 75, 3, "2024-03-01T00:00:00Z"),
        ];

        for (title, content, upvotes, answers, created_at) in questions {
            store
                .insert_question(
                    NewQuestion::new(title, content)
                        .with_upvotes(upvotes)
                        .with_answers(answers)
                        .with_created_at(ts(created_at)),
                )
                .await
                .expect("insert question");
        }

        for (name, count) in [("javascript", 100), ("react", 50), ("node", 200), ("java", 60)] {
            store
                .insert_tag(NewTag::new(name).with_questions(count))
                .await
                .expect("insert tag");
        }

        store
    }

    fn question_query(
        search: Option<&str>,
        filter: QuestionFilter,
        page: i64,
        size: i64,
    ) -> QuestionQuery {
        QuestionQuery::new(
            QuestionPredicate::new(search, filter),
            filter.sort_by(),
            OffsetPagination::from_page(page, size),
        )
    }

    fn titles(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.title.as_str()).collect()
    }

    #[tokio::test]
    async fn newest_first_with_extra_record() {
        let store = seeded().await;

        let fetched = store
            .find_questions(question_query(None, QuestionFilter::Newest, 1, 2))
            .await
            .expect("listing");

        assert_eq!(
            titles(&fetched),
            vec![
                "Node.js best practices",
                "JavaScript async/await explained",
                "How to use React hooks?",
            ]
        );
    }

    #[tokio::test]
    async fn second_page_skips_first() {
        let store = seeded().await;

        let fetched = store
            .find_questions(question_query(None, QuestionFilter::Newest, 2, 2))
            .await
            .expect("listing");

        assert_eq!(titles(&fetched), vec!["How to use React hooks?"]);
    }

    #[tokio::test]
    async fn popular_and_unanswered_views() {
        let store = seeded().await;

        let popular = store
            .find_questions(question_query(None, QuestionFilter::Popular, 1, 10))
            .await
            .expect("listing");
        let upvotes: Vec<i32> = popular.iter().map(|q| q.upvotes).collect();
        assert_eq!(upvotes, vec![100, 75, 50]);

        let unanswered = store
            .find_questions(question_query(None, QuestionFilter::Unanswered, 1, 10))
            .await
            .expect("listing");
        assert_eq!(titles(&unanswered), vec!["JavaScript async/await explained"]);
    }

    #[tokio::test]
    async fn search_matches_body_text() {
        let store = seeded().await;

        let fetched = store
            .find_questions(question_query(Some("USESTATE"), QuestionFilter::Newest, 1, 10))
            .await
            .expect("listing");

        assert_eq!(titles(&fetched), vec!["How to use React hooks?"]);
    }

    #[tokio::test]
    async fn sort_override_reverses_primary_key() {
        let store = seeded().await;
        let filter = QuestionFilter::Popular;
        let query = QuestionQuery::new(
            QuestionPredicate::new(None, filter),
            filter.sort_by().with_order(Some(SortOrder::Asc)),
            OffsetPagination::from_page(1, 10),
        );

        let fetched = store.find_questions(query).await.expect("listing");
        let upvotes: Vec<i32> = fetched.iter().map(|q| q.upvotes).collect();
        assert_eq!(upvotes, vec![50, 75, 100]);
    }

    #[tokio::test]
    async fn ties_break_by_id_ascending() {
        let store = MemoryStore::new();
        let created_at = ts("2024-05-01T00:00:00Z");
        let mut ids = Vec::new();

        for title in ["first", "second", "third"] {
            let question = store
                .insert_question(NewQuestion::new(title, "").with_created_at(created_at))
                .await
                .expect("insert question");
            ids.push(question.id);
        }
        ids.sort();

        let fetched = store
            .find_questions(question_query(None, QuestionFilter::Newest, 1, 10))
            .await
            .expect("listing");
        let fetched_ids: Vec<Uuid> = fetched.iter().map(|q| q.id).collect();
        assert_eq!(fetched_ids, ids);
    }

    #[tokio::test]
    async fn tags_sorted_by_question_count() {
        let store = seeded().await;
        let predicate = TagPredicate::new(None);
        let sort = predicate.sort_by();
        let query = TagQuery::new(predicate, sort, OffsetPagination::from_page(1, 2));

        let fetched = store.find_tags(query).await.expect("listing");
        let names: Vec<&str> = fetched.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["node", "javascript", "java"]);
    }

    #[tokio::test]
    async fn tags_partial_name_search() {
        let store = seeded().await;
        let predicate = TagPredicate::new(Some("jav"));
        let sort = predicate.sort_by();
        let query = TagQuery::new(predicate, sort, OffsetPagination::from_page(1, 10));

        let fetched = store.find_tags(query).await.expect("listing");
        let names: Vec<&str> = fetched.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["javascript", "java"]);
    }

    #[tokio::test]
    async fn find_tags_by_ids_and_ping() {
        let store = seeded().await;
        let rust = store
            .insert_tag(NewTag::new("rust"))
            .await
            .expect("insert tag");

        let found = store
            .find_tags_by_ids(&[rust.id, Uuid::now_v7()])
            .await
            .expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "rust");

        assert!(store.ping().await.is_ok());
        assert_eq!(store.len().await, (3, 5));
    }

    #[tokio::test]
    async fn tag_names_are_unique_ignoring_case() {
        let store = MemoryStore::new();
        store
            .insert_tag(NewTag::new("Go"))
            .await
            .expect("insert tag");

        let result = store.insert_tag(NewTag::new("go")).await;
        assert!(matches!(result, Err(StoreError::Unexpected(_))));
        assert_eq!(store.len().await, (0, 1));
    }
}
