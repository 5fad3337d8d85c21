#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging client initialization, configuration, and lifecycle events.
pub const TRACING_TARGET_CLIENT: &str = "devflow_store::client";

/// Tracing target for listing query operations.
///
/// Use this target for logging query execution, results, and query-related errors.
pub const TRACING_TARGET_QUERY: &str = "devflow_store::queries";

/// Tracing target for database migration operations.
pub const TRACING_TARGET_MIGRATION: &str = "devflow_store::migrations";

/// Tracing target for database connection operations.
///
/// Use this target for logging connection establishment, pool management, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "devflow_store::connection";

/// Tracing target for fixture loading.
pub const TRACING_TARGET_FIXTURES: &str = "devflow_store::fixtures";

mod client;
mod fixtures;
mod memory;
pub mod model;
pub mod query;
mod schema;
mod store;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, MigrationResult, PgClient, PgConfig, PoolStatus, PooledConnection,
    run_pending_migrations,
};
pub use crate::fixtures::{FixtureQuestion, FixtureTag, Fixtures, FixturesReport};
pub use crate::memory::MemoryStore;
pub use crate::store::Store;

pub mod error {
    //! Error types and utilities for store operations.
    //!
    //! See [`StoreError`] for the main error type used throughout this crate.
    //!
    //! [`StoreError`]: crate::StoreError

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    pub use deadpool::managed::TimeoutType;
    pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;
}

/// Error type for every store operation, whichever executor runs it.
#[derive(Debug, thiserror::Error)]
#[must_use = "store errors should be handled appropriately"]
pub enum StoreError {
    /// Configuration error.
    ///
    /// This includes invalid configuration parameters, missing required settings,
    /// or other issues related to the database configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation timed out.
    ///
    /// This can occur during connection creation, waiting for available connections,
    /// or connection recycling operations.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Database migration operation failed.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// Query execution failed.
    ///
    /// This includes SQL syntax errors, constraint violations, type mismatches,
    /// and other query-related failures.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Fixture file could not be read or does not describe a consistent data set.
    #[error("Fixture error: {0}")]
    Fixture(Cow<'static, str>),

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl StoreError {
    /// Returns whether this error indicates a transient failure that might succeed on retry.
    ///
    /// Transient errors include timeouts and broken connections.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Timeout(_) | StoreError::Connection(ConnectionError::BadConnection(_))
        )
    }
}

impl From<error::DeadpoolError> for StoreError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %err,
                    "Unexpected post-create hook error"
                );
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!(
                    target: TRACING_TARGET_CONNECTION,
                    "No tokio runtime specified for connection pool"
                );
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::BadConnection(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for store operations.
pub type StoreResult<T, E = StoreError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_transient() {
        let error = StoreError::Timeout(TimeoutType::Wait);
        assert!(error.is_transient());
    }

    #[test]
    fn broken_connections_are_transient() {
        let error = StoreError::Connection(ConnectionError::BadConnection("reset".into()));
        assert!(error.is_transient());
    }

    #[test]
    fn query_and_fixture_errors_are_not_transient() {
        assert!(!StoreError::Query(Error::NotFound).is_transient());
        assert!(!StoreError::Fixture("unknown tag".into()).is_transient());
        assert!(!StoreError::Config("empty url".into()).is_transient());
    }

    #[test]
    fn closed_pool_maps_to_transient_connection_error() {
        let error = StoreError::from(error::DeadpoolError::Closed);
        assert!(matches!(error, StoreError::Connection(_)));
        assert!(error.is_transient());
    }
}
