//! Tag listing handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, Query};
use crate::handler::Result;
use crate::handler::response::{ActionResponse, TagItem, TagsPage};
use crate::service::{ListingParams, ListingResolver, ServiceState};

/// Tracing target for tag listing operations.
const TRACING_TARGET: &str = "devflow_server::handler::tags";

/// Lists tags from query-string parameters.
#[tracing::instrument(skip_all)]
async fn list_tags(
    State(listings): State<ListingResolver>,
    Query(params): Query<ListingParams>,
) -> Result<(StatusCode, Json<ActionResponse<TagsPage>>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing tags");
    resolve_tags(&listings, params.coerce_query_strings()).await
}

fn list_tags_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List tags")
        .description(
            "Returns one page of tags, most used first. `query` matches tag names \
            case-insensitively and `filter` is ignored.",
        )
        .response::<200, Json<ActionResponse<TagsPage>>>()
        .response::<400, Json<ActionResponse>>()
        .response::<500, Json<ActionResponse>>()
        .response::<503, Json<ActionResponse>>()
}

/// Lists tags from a JSON body.
#[tracing::instrument(skip_all)]
async fn search_tags(
    State(listings): State<ListingResolver>,
    Json(params): Json<ListingParams>,
) -> Result<(StatusCode, Json<ActionResponse<TagsPage>>)> {
    tracing::debug!(target: TRACING_TARGET, "Searching tags");
    resolve_tags(&listings, params).await
}

fn search_tags_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Search tags")
        .description("Same listing as `GET /tags`, with parameters sent as a JSON body.")
        .response::<200, Json<ActionResponse<TagsPage>>>()
        .response::<400, Json<ActionResponse>>()
        .response::<500, Json<ActionResponse>>()
        .response::<503, Json<ActionResponse>>()
}

async fn resolve_tags(
    listings: &ListingResolver,
    params: ListingParams,
) -> Result<(StatusCode, Json<ActionResponse<TagsPage>>)> {
    let page = listings.list_tags(&params).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        tag_count = page.items.len(),
        has_next = page.has_next,
        "Tags listed"
    );

    let page = page.map(TagItem::from_model);
    Ok((StatusCode::OK, Json(ActionResponse::success(page))))
}

/// Returns a [`Router`] with all tag listing routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/tags", get_with(list_tags, list_tags_docs))
        .api_route("/tags/search", post_with(search_tags, search_tags_docs))
        .with_path_items(|item| item.tag("Tags"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    fn names(body: &Value) -> Vec<&str> {
        body["data"]["items"]
            .as_array()
            .map(|items| items.iter().filter_map(|i| i["name"].as_str()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn tags_by_question_count() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/tags").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(names(&body), vec!["node", "javascript", "java", "react"]);
        assert_eq!(body["data"]["items"][0]["questions"], 200);
        assert_eq!(body["data"]["hasNext"], false);
        Ok(())
    }

    #[tokio::test]
    async fn tag_pages() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/tags?page=2&pageSize=3").await;
        let body = response.json::<Value>();
        assert_eq!(names(&body), vec!["react"]);
        assert_eq!(body["data"]["hasNext"], false);
        Ok(())
    }

    #[tokio::test]
    async fn partial_name_search() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/tags/search")
            .json(&json!({ "query": "JAV" }))
            .await;
        response.assert_status_ok();
        assert_eq!(names(&response.json::<Value>()), vec!["javascript", "java"]);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_types_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/tags/search")
            .json(&json!({ "pageSize": 2.5, "query": 42 }))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"]["message"],
            "Invalid input: expected int, received number, \
             Invalid input: expected string, received number"
        );
        Ok(())
    }
}
