//! Questions repository for listing operations.

use std::future::Future;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::QuestionQuery;
use crate::model::{NewQuestion, Question};
use crate::types::{QuestionSortField, SortOrder};
use crate::{PgConnection, StoreError, StoreResult, TRACING_TARGET_QUERY, schema};

/// Repository for question database operations.
pub trait QuestionRepository {
    /// Creates a new question record.
    fn create_question(
        &mut self,
        new_question: NewQuestion,
    ) -> impl Future<Output = StoreResult<Question>> + Send;

    /// Lists questions matching the query.
    fn list_questions(
        &mut self,
        query: QuestionQuery,
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;
}

impl QuestionRepository for PgConnection {
    async fn create_question(&mut self, new_question: NewQuestion) -> StoreResult<Question> {
        use schema::questions;

        let question = diesel::insert_into(questions::table)
            .values(&new_question)
            .returning(Question::as_returning())
            .get_result(self)
            .await
            .map_err(StoreError::from)?;

        Ok(question)
    }

    async fn list_questions(&mut self, query: QuestionQuery) -> StoreResult<Vec<Question>> {
        let records = listing_statement(&query)
            .select(Question::as_select())
            .load(self)
            .await
            .map_err(StoreError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            fetched = records.len(),
            "Question listing executed"
        );

        Ok(records)
    }
}

/// Builds the filtered, ordered and windowed select for a question listing.
fn listing_statement(query: &QuestionQuery) -> schema::questions::BoxedQuery<'static, Pg> {
    use schema::questions::{self, dsl};

    let mut statement = questions::table.into_boxed();

    if let Some(term) = &query.predicate.search {
        let pattern = term.like_pattern();
        statement = statement.filter(
            dsl::title
                .ilike(pattern.clone())
                .or(dsl::content.ilike(pattern)),
        );
    }

    if query.predicate.unanswered_only {
        statement = statement.filter(dsl::answers.eq(0));
    }

    let statement = match (query.sort.field, query.sort.order) {
        (QuestionSortField::CreatedAt, SortOrder::Asc) => statement.order(dsl::created_at.asc()),
        (QuestionSortField::CreatedAt, SortOrder::Desc) => statement.order(dsl::created_at.desc()),
        (QuestionSortField::Upvotes, SortOrder::Asc) => statement.order(dsl::upvotes.asc()),
        (QuestionSortField::Upvotes, SortOrder::Desc) => statement.order(dsl::upvotes.desc()),
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
    use crate::types::{OffsetPagination, QuestionFilter, QuestionPredicate};

    fn sql(search: Option<&str>, filter: QuestionFilter, order: Option<SortOrder>) -> String {
        let query = QuestionQuery::new(
            QuestionPredicate::new(search, filter),
            filter.sort_by().with_order(order),
            OffsetPagination::from_page(3, 10),
        );
        debug_query::<Pg, _>(&listing_statement(&query)).to_string()
    }

    #[test]
    fn newest_listing_has_no_predicate() {
        let sql = sql(None, QuestionFilter::Newest, None);

        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(
            sql.contains(r#"ORDER BY "questions"."created_at" DESC, "questions"."id" ASC"#),
            "{sql}"
        );
        assert!(sql.contains("LIMIT $1 OFFSET $2"), "{sql}");
        assert!(sql.ends_with("-- binds: [11, 20]"), "{sql}");
    }

    #[test]
    fn search_matches_title_or_content_literally() {
        let sql = sql(Some("50%_off"), QuestionFilter::Newest, None);

        assert!(sql.contains(r#""questions"."title" ILIKE $1"#), "{sql}");
        assert!(sql.contains(r#" OR "#), "{sql}");
        assert!(sql.contains(r#""questions"."content" ILIKE $2"#), "{sql}");
        assert!(sql.contains(r#""%50\%\_off%""#), "{sql}");
        assert!(sql.contains("LIMIT $3 OFFSET $4"), "{sql}");
    }

    #[test]
    fn unanswered_view_requires_zero_answers() {
        let sql = sql(Some("react"), QuestionFilter::Unanswered, None);

        assert!(sql.contains(r#""questions"."answers" = $3"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
        assert!(sql.contains(r#""questions"."created_at" DESC"#), "{sql}");
    }

    #[test]
    fn popular_view_with_ascending_override() {
        let sql = sql(None, QuestionFilter::Popular, Some(SortOrder::Asc));

        assert!(
            sql.contains(r#"ORDER BY "questions"."upvotes" ASC, "questions"."id" ASC"#),
            "{sql}"
        );
    }
}
