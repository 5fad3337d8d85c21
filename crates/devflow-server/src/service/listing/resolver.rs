use std::collections::HashMap;

use devflow_store::model::{Question, Tag};
use devflow_store::query::DocumentStore;
use devflow_store::types::OffsetPage;
use devflow_store::{Store, StoreResult};
use uuid::Uuid;

use super::{ListingError, ListingParams, TRACING_TARGET};

/// Question together with the tags it references.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionListing {
    /// The question record.
    pub question: Question,
    /// Referenced tags, in the order the question lists them.
    pub tags: Vec<Tag>,
}

/// Resolves listing parameters into pages of records.
///
/// The resolver holds no state besides its store handle; each call validates,
/// runs exactly one listing query and returns the page.
#[derive(Debug, Clone)]
pub struct ListingResolver<S = Store> {
    store: S,
}

impl<S> ListingResolver<S>
where
    S: DocumentStore + Send + Sync,
{
    /// Creates a resolver over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists one page of questions with their tags populated.
    pub async fn list_questions(
        &self,
        params: &ListingParams,
    ) -> Result<OffsetPage<QuestionListing>, ListingError> {
        let request = params.validate()?;
        let query = request.question_query();
        let pagination = query.pagination;

        tracing::debug!(
            target: TRACING_TARGET,
            page = request.page,
            page_size = request.page_size,
            filter = %request.question_filter(),
            sort = ?query.sort,
            "Resolving question listing"
        );

        let fetched = self.store.find_questions(query).await?;
        let page = OffsetPage::from_fetched(fetched, &pagination);
        let tags = self.referenced_tags(&page.items).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            items = page.items.len(),
            has_next = page.has_next,
            "Question listing resolved"
        );

        Ok(page.map(|question| {
            let tags = question
                .tags
                .iter()
                .filter_map(|id| tags.get(id).cloned())
                .collect();
            QuestionListing { question, tags }
        }))
    }

    /// Lists one page of tags ordered by question count.
    pub async fn list_tags(&self, params: &ListingParams) -> Result<OffsetPage<Tag>, ListingError> {
        let request = params.validate()?;
        let query = request.tag_query();
        let pagination = query.pagination;

        tracing::debug!(
            target: TRACING_TARGET,
            page = request.page,
            page_size = request.page_size,
            sort = ?query.sort,
            "Resolving tag listing"
        );

        let fetched = self.store.find_tags(query).await?;
        let page = OffsetPage::from_fetched(fetched, &pagination);

        tracing::debug!(
            target: TRACING_TARGET,
            items = page.items.len(),
            has_next = page.has_next,
            "Tag listing resolved"
        );

        Ok(page)
    }

    async fn referenced_tags(&self, questions: &[Question]) -> StoreResult<HashMap<Uuid, Tag>> {
        let mut tag_ids: Vec<Uuid> = questions
            .iter()
            .flat_map(|question| question.tags.iter().copied())
            .collect();
        tag_ids.sort_unstable();
        tag_ids.dedup();

        if tag_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let tags = self.store.find_tags_by_ids(&tag_ids).await?;
        Ok(tags.into_iter().map(|tag| (tag.id, tag)).collect())
    }
}

#[cfg(test)]
mod tests {
    use devflow_store::MemoryStore;

    use super::*;
    use crate::service::test::seeded_store;

    async fn resolver() -> anyhow::Result<ListingResolver<MemoryStore>> {
        Ok(ListingResolver::new(seeded_store().await?))
    }

    fn titles(page: &OffsetPage<QuestionListing>) -> Vec<&str> {
        page.items
            .iter()
            .map(|listing| listing.question.title.as_str())
            .collect()
    }

    fn tag_names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|tag| tag.name.as_str()).collect()
    }

    #[tokio::test]
    async fn newest_first_across_pages() -> anyhow::Result<()> {
        let resolver = resolver().await?;

        let first = resolver
            .list_questions(&ListingParams::for_page(1, 2))
            .await?;
        assert_eq!(
            titles(&first),
            vec!["Node.js best practices", "JavaScript async/await explained"]
        );
        assert!(first.has_next);

        let second = resolver
            .list_questions(&ListingParams::for_page(2, 2))
            .await?;
        assert_eq!(titles(&second), vec!["How to use React hooks?"]);
        assert!(!second.has_next);
        Ok(())
    }

    #[tokio::test]
    async fn page_size_bounds_items() -> anyhow::Result<()> {
        let resolver = resolver().await?;

        for page_size in 1..=4 {
            let page = resolver
                .list_questions(&ListingParams::for_page(1, page_size))
                .await?;
            assert!(page.items.len() as i64 <= page_size);
            assert_eq!(page.has_next, page_size < 3);
        }
        Ok(())
    }

    #[tokio::test]
    async fn exact_fit_has_no_next_page() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_questions(&ListingParams::for_page(1, 3))
            .await?;
        assert_eq!(page.items.len(), 3);
        assert!(!page.has_next);
        Ok(())
    }

    #[tokio::test]
    async fn unanswered_filter() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_questions(&ListingParams::default().with_filter("unanswered"))
            .await?;

        assert_eq!(titles(&page), vec!["JavaScript async/await explained"]);
        assert!(page.items.iter().all(|l| l.question.answers == 0));
        Ok(())
    }

    #[tokio::test]
    async fn popular_filter() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_questions(&ListingParams::default().with_filter("popular"))
            .await?;

        let upvotes: Vec<i32> = page.items.iter().map(|l| l.question.upvotes).collect();
        assert_eq!(upvotes, vec![100, 75, 50]);
        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_title_and_body() -> anyhow::Result<()> {
        let resolver = resolver().await?;

        let by_title = resolver
            .list_questions(&ListingParams::default().with_query("REACT"))
            .await?;
        assert_eq!(titles(&by_title), vec!["How to use React hooks?"]);

        let by_body = resolver
            .list_questions(&ListingParams::default().with_query("promises"))
            .await?;
        assert_eq!(titles(&by_body), vec!["JavaScript async/await explained"]);

        let none = resolver
            .list_questions(&ListingParams::default().with_query("nonexistent"))
            .await?;
        assert!(none.items.is_empty());
        assert!(!none.has_next);
        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_questions(&ListingParams::default().with_query("%"))
            .await?;
        assert!(page.items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn query_and_filter_combine() -> anyhow::Result<()> {
        let resolver = resolver().await?;

        let page = resolver
            .list_questions(
                &ListingParams::default()
                    .with_query("javascript")
                    .with_filter("unanswered"),
            )
            .await?;
        assert_eq!(titles(&page), vec!["JavaScript async/await explained"]);

        let page = resolver
            .list_questions(
                &ListingParams::default()
                    .with_query("react")
                    .with_filter("unanswered"),
            )
            .await?;
        assert!(page.items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn question_tags_are_populated_in_order() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_questions(&ListingParams::default().with_query("hooks"))
            .await?;

        let listing = page
            .items
            .first()
            .ok_or_else(|| anyhow::anyhow!("no question listed"))?;
        assert_eq!(tag_names(&listing.tags), vec!["react", "javascript"]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_params_never_reach_the_store() -> anyhow::Result<()> {
        let resolver = ListingResolver::new(MemoryStore::new());
        let error = resolver
            .list_questions(&ListingParams::for_page(0, -5))
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("listing was accepted"))?;

        assert!(matches!(error, ListingError::Validation(_)));
        assert_eq!(
            error.to_string(),
            "Page must be at least 1, Page size must be at least 1"
        );
        Ok(())
    }

    #[tokio::test]
    async fn tags_by_question_count() -> anyhow::Result<()> {
        let resolver = resolver().await?;

        let first = resolver.list_tags(&ListingParams::for_page(1, 2)).await?;
        assert_eq!(tag_names(&first.items), vec!["node", "javascript"]);
        assert!(first.has_next);

        let second = resolver.list_tags(&ListingParams::for_page(2, 2)).await?;
        assert_eq!(tag_names(&second.items), vec!["java", "react"]);
        assert!(!second.has_next);
        Ok(())
    }

    #[tokio::test]
    async fn tags_partial_name_search() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_tags(&ListingParams::default().with_query("jav"))
            .await?;

        assert_eq!(tag_names(&page.items), vec!["javascript", "java"]);
        Ok(())
    }

    #[tokio::test]
    async fn tags_ascending_override() -> anyhow::Result<()> {
        let resolver = resolver().await?;
        let page = resolver
            .list_tags(&ListingParams::for_page(1, 1).with_sort("asc"))
            .await?;

        assert_eq!(tag_names(&page.items), vec!["react"]);
        Ok(())
    }
}
