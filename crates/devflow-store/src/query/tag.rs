//! Tags repository for listing operations.

use std::future::Future;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::TagQuery;
use crate::model::{NewTag, Tag};
use crate::types::{SortOrder, TagSortField};
use crate::{PgConnection, StoreError, StoreResult, TRACING_TARGET_QUERY, schema};

/// Repository for tag database operations.
pub trait TagRepository {
    /// Creates a new tag record.
    fn create_tag(&mut self, new_tag: NewTag) -> impl Future<Output = StoreResult<Tag>> + Send;

    /// Lists tags matching the query.
    fn list_tags(&mut self, query: TagQuery)
    -> impl Future<Output = StoreResult<Vec<Tag>>> + Send;

    /// Finds multiple tags by their IDs.
    fn find_tags_by_ids(
        &mut self,
        tag_ids: &[Uuid],
    ) -> impl Future<Output = StoreResult<Vec<Tag>>> + Send;
}

impl TagRepository for PgConnection {
    async fn create_tag(&mut self, new_tag: NewTag) -> StoreResult<Tag> {
        use schema::tags;

        let tag = diesel::insert_into(tags::table)
            .values(&new_tag)
            .returning(Tag::as_returning())
            .get_result(self)
            .await
            .map_err(StoreError::from)?;

        Ok(tag)
    }

    async fn list_tags(&mut self, query: TagQuery) -> StoreResult<Vec<Tag>> {
        let records = listing_statement(&query)
            .select(Tag::as_select())
            .load(self)
            .await
            .map_err(StoreError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            fetched = records.len(),
            "Tag listing executed"
        );

        Ok(records)
    }

    async fn find_tags_by_ids(&mut self, tag_ids: &[Uuid]) -> StoreResult<Vec<Tag>> {
        use schema::tags::{self, dsl};

        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tags = tags::table
            .filter(dsl::id.eq_any(tag_ids))
            .select(Tag::as_select())
            .load(self)
            .await
            .map_err(StoreError::from)?;

        Ok(tags)
    }
}

/// Builds the filtered, ordered and windowed select for a tag listing.
fn listing_statement(query: &TagQuery) -> schema::tags::BoxedQuery<'static, Pg> {
    use schema::tags::{self, dsl};

    let mut statement = tags::table.into_boxed();

    if let Some(term) = &query.predicate.search {
        statement = statement.filter(dsl::name.ilike(term.like_pattern()));
    }

    let statement = match (query.sort.field, query.sort.order) {
        (TagSortField::Questions, SortOrder::Asc) => statement.order(dsl::questions.asc()),
        (TagSortField::Questions, SortOrder::Desc) => statement.order(dsl::questions.desc()),
    };

    statement
        .then_order_by(dsl::id.asc())
        .limit(query.fetch_limit())
        .offset(query.offset())
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;

    use super::*;
    use crate::types::{OffsetPagination, TagPredicate};

    fn sql(search: Option<&str>, order: Option<SortOrder>) -> String {
        let predicate = TagPredicate::new(search);
        let sort = predicate.sort_by().with_order(order);
        let query = TagQuery::new(predicate, sort, OffsetPagination::from_page(2, 2));
        debug_query::<Pg, _>(&listing_statement(&query)).to_string()
    }

    #[test]
    fn tags_by_question_count_then_id() {
        let sql = sql(None, None);

        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(
            sql.contains(r#"ORDER BY "tags"."questions" DESC, "tags"."id" ASC"#),
            "{sql}"
        );
        assert!(sql.contains("LIMIT $1 OFFSET $2"), "{sql}");
        assert!(sql.ends_with("-- binds: [3, 2]"), "{sql}");
    }

    #[test]
    fn name_search_and_ascending_override() {
        let sql = sql(Some("jav"), Some(SortOrder::Asc));

        assert!(sql.contains(r#""tags"."name" ILIKE $1"#), "{sql}");
        assert!(sql.contains(r#""%jav%""#), "{sql}");
        assert!(sql.contains(r#""tags"."questions" ASC"#), "{sql}");
    }
}
