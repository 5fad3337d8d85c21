//! Failures that stop the `devflow` process, with operator hints.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use devflow_server::ErrorKind;

/// Result type for starting and running the server.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Why the server did not start or did not stop cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The document store could not be opened, migrated or seeded.
    #[error("cannot prepare the document store: {0}")]
    Startup(#[source] devflow_server::Error),

    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// In-flight listings were still running when the drain ended.
    #[error("listings still running {}s after the shutdown signal", .0.as_secs())]
    ShutdownTimeout(Duration),

    #[error("server failed: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Returns the code logged with the failure.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::Startup(_) => "E002",
            Self::Bind { .. } => "E003",
            Self::ShutdownTimeout(_) => "E004",
            Self::Runtime(_) => "E005",
        }
    }

    /// Returns whether restarting with the same configuration may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Startup(err) => err.kind() == ErrorKind::Store,
            Self::Bind { source, .. } => source.kind() == io::ErrorKind::AddrInUse,
            Self::ShutdownTimeout(_) => true,
            Self::Runtime(err) => {
                matches!(err.kind(), io::ErrorKind::Interrupted | io::ErrorKind::TimedOut)
            }
            Self::InvalidConfig(_) => false,
        }
    }

    /// Returns a hint naming the flag or environment variable to look at.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => Some("Run `devflow --help` for accepted values"),
            Self::Startup(err) => match err.kind() {
                ErrorKind::Config => {
                    Some("Set --postgres-url (POSTGRES_URL) or run with --store memory")
                }
                ErrorKind::Store => {
                    Some("Check that PostgreSQL is reachable and may run the migrations")
                }
                ErrorKind::Fixture => Some(
                    "Check that the --seed (SEED_FILE) file exists and that questions only \
                    reference declared tags",
                ),
                ErrorKind::Internal => None,
            },
            Self::Bind { source, .. } => match source.kind() {
                io::ErrorKind::AddrInUse => Some("Pick another --port (PORT)"),
                io::ErrorKind::AddrNotAvailable => Some("Pick a local --host (HOST) address"),
                _ => None,
            },
            Self::ShutdownTimeout(_) => {
                Some("Raise --shutdown-timeout or lower --request-timeout")
            }
            Self::Runtime(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn every_variant() -> Vec<ServerError> {
        vec![
            ServerError::InvalidConfig("port 80".to_owned()),
            ServerError::Startup(devflow_server::Error::fixture("unknown tag")),
            ServerError::Bind {
                address: SocketAddr::from(([127, 0, 0, 1], 3000)),
                source: io::Error::from(io::ErrorKind::AddrInUse),
            },
            ServerError::ShutdownTimeout(Duration::from_secs(30)),
            ServerError::Runtime(io::Error::other("accept failed")),
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: HashSet<&str> = every_variant().iter().map(|e| e.error_code()).collect();
        assert_eq!(codes.len(), every_variant().len());
    }

    #[test]
    fn store_startup_failures_point_at_the_backend() {
        let error = ServerError::Startup(devflow_server::Error::store("connection refused"));
        assert!(error.is_recoverable());
        assert!(error.suggestion().is_some_and(|s| s.contains("PostgreSQL")));

        let error = ServerError::Startup(devflow_server::Error::fixture("unknown tag"));
        assert!(!error.is_recoverable());
        assert!(error.suggestion().is_some_and(|s| s.contains("--seed")));
    }

    #[test]
    fn shutdown_timeout_names_the_deadline() {
        let error = ServerError::ShutdownTimeout(Duration::from_secs(30));
        assert_eq!(error.to_string(), "listings still running 30s after the shutdown signal");
        assert!(error.suggestion().is_some());
    }
}
