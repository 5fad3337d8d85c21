//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use devflow_server::handler::routes;
//! use devflow_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use devflow_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! let router: axum::Router = routes()
//!     .with_state(state)
//!     .with_open_api(OpenApiConfig::default());
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod questions;
pub mod response;
mod tags;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(questions::routes())
        .merge(tags::routes())
        .merge(monitors::routes())
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use aide::axum::ApiRouter;
    use aide::openapi::OpenApi;
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::ServiceState;
    use crate::service::test::seeded_state;

    /// Returns a new [`TestServer`] with the given router over seeded state.
    pub async fn create_test_server_with_router(
        router: impl Fn(ServiceState) -> ApiRouter<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let state = seeded_state().await?;
        let router = router(state.clone());
        create_test_server_with_state(router, state)
    }

    /// Returns a new [`TestServer`] with the given router and state.
    pub fn create_test_server_with_state(
        router: ApiRouter<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let router = router
            .with_state::<()>(state)
            .finish_api(&mut OpenApi::default());
        let server = TestServer::new(router)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with all routes over seeded state.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(|_| routes()).await
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::test::create_test_server;

    #[tokio::test]
    async fn unknown_routes_are_not_found_envelopes() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/answers").expect_failure().await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "success": false,
                "error": { "name": "not_found", "message": "No listing is served at this path." }
            })
        );
        Ok(())
    }
}
