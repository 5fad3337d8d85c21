//! HTTP listener with a bounded graceful shutdown.

mod error;
mod http_server;
mod shutdown;

pub use error::{ServerError, ServerResult};
pub use http_server::serve_http;
use shutdown::shutdown_signal;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "devflow_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "devflow_cli::server::shutdown";
