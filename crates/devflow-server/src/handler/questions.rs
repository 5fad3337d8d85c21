//! Question listing handlers.
//!
//! `GET /questions` reads its parameters from the query string, where every
//! value arrives as text and numeric page fields are coerced.
//! `POST /questions/search` takes the same parameters as a JSON body and
//! validates them exactly as sent.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, Query};
use crate::handler::Result;
use crate::handler::response::{ActionResponse, QuestionItem, QuestionsPage};
use crate::service::{ListingParams, ListingResolver, ServiceState};

/// Tracing target for question listing operations.
const TRACING_TARGET: &str = "devflow_server::handler::questions";

/// Lists questions from query-string parameters.
#[tracing::instrument(skip_all)]
async fn list_questions(
    State(listings): State<ListingResolver>,
    Query(params): Query<ListingParams>,
) -> Result<(StatusCode, Json<ActionResponse<QuestionsPage>>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing questions");
    resolve_questions(&listings, params.coerce_query_strings()).await
}

fn list_questions_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List questions")
        .description(
            "Returns one page of questions, newest first unless a `filter` view is given. \
            `query` matches titles and bodies case-insensitively.",
        )
        .response::<200, Json<ActionResponse<QuestionsPage>>>()
        .response::<400, Json<ActionResponse>>()
        .response::<500, Json<ActionResponse>>()
        .response::<503, Json<ActionResponse>>()
}

/// Lists questions from a JSON body.
#[tracing::instrument(skip_all)]
async fn search_questions(
    State(listings): State<ListingResolver>,
    Json(params): Json<ListingParams>,
) -> Result<(StatusCode, Json<ActionResponse<QuestionsPage>>)> {
    tracing::debug!(target: TRACING_TARGET, "Searching questions");
    resolve_questions(&listings, params).await
}

fn search_questions_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Search questions")
        .description(
            "Same listing as `GET /questions`, with parameters sent as a JSON body. \
            Values are validated with their JSON types.",
        )
        .response::<200, Json<ActionResponse<QuestionsPage>>>()
        .response::<400, Json<ActionResponse>>()
        .response::<500, Json<ActionResponse>>()
        .response::<503, Json<ActionResponse>>()
}

async fn resolve_questions(
    listings: &ListingResolver,
    params: ListingParams,
) -> Result<(StatusCode, Json<ActionResponse<QuestionsPage>>)> {
    let page = listings.list_questions(&params).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        question_count = page.items.len(),
        has_next = page.has_next,
        "Questions listed"
    );

    let page = page.map(QuestionItem::from);
    Ok((StatusCode::OK, Json(ActionResponse::success(page))))
}

/// Returns a [`Router`] with all question listing routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/questions",
            get_with(list_questions, list_questions_docs),
        )
        .api_route(
            "/questions/search",
            post_with(search_questions, search_questions_docs),
        )
        .with_path_items(|item| item.tag("Questions"))
}
