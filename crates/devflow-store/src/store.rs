//! Backend selection over the available document stores.

use uuid::Uuid;

use crate::model::{NewQuestion, NewTag, Question, Tag};
use crate::query::{
    DocumentStore, DocumentWriter, QuestionQuery, QuestionRepository, TagQuery, TagRepository,
};
use crate::{MemoryStore, PgClient, PgConnection, PoolStatus, StoreResult};

impl DocumentStore for PgClient {
    async fn find_questions(&self, query: QuestionQuery) -> StoreResult<Vec<Question>> {
        let mut conn = self.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;
        conn.list_questions(query).await
    }

    async fn find_tags(&self, query: TagQuery) -> StoreResult<Vec<Tag>> {
        let mut conn = self.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;
        conn.list_tags(query).await
    }

    async fn find_tags_by_ids(&self, tag_ids: &[Uuid]) -> StoreResult<Vec<Tag>> {
        let mut conn = self.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;
        TagRepository::find_tags_by_ids(conn, tag_ids).await
    }

    async fn ping(&self) -> StoreResult<()> {
        PgClient::ping(self).await
    }
}

impl DocumentWriter for PgClient {
    async fn insert_tag(&self, new_tag: NewTag) -> StoreResult<Tag> {
        let mut conn = self.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;
        conn.create_tag(new_tag).await
    }

    async fn insert_question(&self, new_question: NewQuestion) -> StoreResult<Question> {
        let mut conn = self.get_connection().await?;
        let conn: &mut PgConnection = &mut conn;
        conn.create_question(new_question).await
    }
}

/// Document store chosen at start-up.
#[derive(Debug, Clone)]
pub enum Store {
    /// In-process collections.
    Memory(MemoryStore),
    /// Pooled PostgreSQL executor.
    Postgres(PgClient),
}

impl Store {
    /// Short backend name for logs and health output.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Connection pool occupancy, for pooled backends only.
    pub fn pool_status(&self) -> Option<PoolStatus> {
        match self {
            Self::Memory(_) => None,
            Self::Postgres(client) => Some(client.pool_status()),
        }
    }
}

impl From<MemoryStore> for Store {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}

impl From<PgClient> for Store {
    fn from(client: PgClient) -> Self {
        Self::Postgres(client)
    }
}

impl DocumentStore for Store {
    async fn find_questions(&self, query: QuestionQuery) -> StoreResult<Vec<Question>> {
        match self {
            Self::Memory(store) => store.find_questions(query).await,
            Self::Postgres(client) => client.find_questions(query).await,
        }
    }

    async fn find_tags(&self, query: TagQuery) -> StoreResult<Vec<Tag>> {
        match self {
            Self::Memory(store) => store.find_tags(query).await,
            Self::Postgres(client) => client.find_tags(query).await,
        }
    }

    async fn find_tags_by_ids(&self, tag_ids: &[Uuid]) -> StoreResult<Vec<Tag>> {
        match self {
            Self::Memory(store) => store.find_tags_by_ids(tag_ids).await,
            Self::Postgres(client) => DocumentStore::find_tags_by_ids(client, tag_ids).await,
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        match self {
            Self::Memory(store) => store.ping().await,
            Self::Postgres(client) => DocumentStore::ping(client).await,
        }
    }
}

impl DocumentWriter for Store {
    async fn insert_tag(&self, new_tag: NewTag) -> StoreResult<Tag> {
        match self {
            Self::Memory(store) => store.insert_tag(new_tag).await,
            Self::Postgres(client) => client.insert_tag(new_tag).await,
        }
    }

    async fn insert_question(&self, new_question: NewQuestion) -> StoreResult<Question> {
        match self {
            Self::Memory(store) => store.insert_question(new_question).await,
            Self::Postgres(client) => client.insert_question(new_question).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OffsetPagination, TagPredicate};

    #[tokio::test]
    async fn memory_backend_dispatch() {
        let store = Store::from(MemoryStore::new());
        assert_eq!(store.backend(), "memory");
        assert_eq!(store.pool_status(), None);

        store
            .insert_tag(NewTag::new("rust").with_questions(3))
            .await
            .expect("insert tag");

        let predicate = TagPredicate::new(Some("RU"));
        let sort = predicate.sort_by();
        let tags = store
            .find_tags(TagQuery::new(predicate, sort, OffsetPagination::default()))
            .await
            .expect("listing");

        assert_eq!(tags.len(), 1);
        assert!(store.ping().await.is_ok());
    }
}
