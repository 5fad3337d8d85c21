//! Monitor response types.

use devflow_store::PoolStatus;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Every dependency answered.
    Healthy,
    /// The document store did not answer.
    Unhealthy,
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Overall system health status.
    pub status: ServiceStatus,
    /// Document store backend in use.
    pub backend: String,
    /// Connection pool occupancy of the `postgres` backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStatus>,
    /// Application version.
    pub version: String,
}

impl MonitorStatus {
    /// Creates a status report generated now.
    pub fn new(status: ServiceStatus, backend: impl Into<String>) -> Self {
        Self {
            checked_at: Timestamp::now(),
            status,
            backend: backend.into(),
            pool: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Attaches the connection pool snapshot.
    pub fn with_pool(self, pool: Option<PoolStatus>) -> Self {
        Self { pool, ..self }
    }

    /// Returns whether the service reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}
