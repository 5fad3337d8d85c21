//! Document store error to HTTP error conversion.
//!
//! Store failures never leak their details to the client: the cause is logged
//! and the response carries the generic message of the chosen [`ErrorKind`].

use devflow_store::StoreError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for store failures surfaced over HTTP.
const TRACING_TARGET: &str = "devflow_server::document_store";

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        let kind = if error.is_transient() {
            ErrorKind::ServiceUnavailable
        } else {
            ErrorKind::InternalServerError
        };

        match error {
            StoreError::Config(ref config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "document store configuration error"
                );
            }
            StoreError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "document store timeout",
                );
            }
            StoreError::Connection(ref connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "document store connection error"
                );
            }
            StoreError::Migration(ref migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "document store migration error"
                );
            }
            StoreError::Query(ref query_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "document store query error"
                );
            }
            StoreError::Fixture(ref message) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "document store fixture error"
                );
            }
            StoreError::Unexpected(ref message) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "unexpected document store error"
                );
            }
        }

        kind.into_error()
    }
}

#[cfg(test)]
mod tests {
    use devflow_store::error::TimeoutType;

    use super::*;

    #[test]
    fn timeouts_are_service_unavailable() {
        let error = Error::from(StoreError::Timeout(TimeoutType::Wait));
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn permanent_failures_are_internal() {
        let error = Error::from(StoreError::Unexpected("row decoding failed".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
    }
}
