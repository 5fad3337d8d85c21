//! Service health handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use devflow_store::Store;
use devflow_store::query::DocumentStore;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{MonitorStatus, ServiceStatus};
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "devflow_server::handler::monitors";

/// Reports whether the document store answers.
#[tracing::instrument(skip_all, fields(backend = store.backend()))]
async fn health_status(
    State(store): State<Store>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let status = match store.ping().await {
        Ok(()) => ServiceStatus::Healthy,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Document store health check failed"
            );
            ServiceStatus::Unhealthy
        }
    };

    let pool = store.pool_status();
    if pool.is_some_and(|pool| pool.is_saturated()) {
        tracing::warn!(
            target: TRACING_TARGET,
            pool = ?pool,
            "Listings are queueing for database connections"
        );
    }

    let response = MonitorStatus::new(status, store.backend()).with_pool(pool);
    let status_code = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health status")
        .description(
            "Pings the document store and reports pool occupancy for the postgres backend. \
            Responds 503 when the store does not answer.",
        )
        .response::<200, Json<MonitorStatus>>()
        .response::<503, Json<MonitorStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}

#[cfg(test)]
mod tests {
    use devflow_store::PgConfig;

    use super::*;
    use crate::handler::test::{create_test_server_with_router, create_test_server_with_state};

    #[tokio::test]
    async fn memory_store_is_healthy() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatus>();
        assert!(status.is_healthy());
        assert_eq!(status.backend, "memory");
        assert!(status.pool.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_postgres_reports_pool() -> anyhow::Result<()> {
        let mut config = PgConfig::new("postgresql://devflow@127.0.0.1:1/devflow");
        config.postgres_connection_timeout_secs = Some(1);
        let state = ServiceState::from_store(config.build()?);
        let server = create_test_server_with_state(routes(), state)?;

        let response = server.get("/health").expect_failure().await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let status = response.json::<MonitorStatus>();
        assert!(!status.is_healthy());
        assert_eq!(status.backend, "postgres");
        assert!(status.pool.is_some_and(|pool| pool.max_size == 10));
        Ok(())
    }
}
