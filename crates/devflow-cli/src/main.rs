#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use axum::Router;
use devflow_server::handler::routes;
use devflow_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
};
use devflow_server::service::ServiceState;

use crate::config::{Cli, ServerConfig};
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "devflow_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "devflow_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "devflow_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    cli.init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting devflow server"
    );

    cli.log();
    cli.validate()?;

    let served = match ServiceState::from_config(&cli.service).await {
        Ok(state) => server::serve_http(create_router(state, &cli.server), &cli.server).await,
        Err(error) => Err(ServerError::Startup(error)),
    };

    if let Err(error) = &served {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            code = error.error_code(),
            recoverable = error.is_recoverable(),
            suggestion = error.suggestion(),
            "server failed"
        );
    }

    served.map_err(Into::into)
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, security headers, compression
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, config: &ServerConfig) -> Router {
    let api_routes: Router = routes()
        .with_state(state)
        .with_open_api(config.openapi.clone());

    api_routes
        .with_security(&config.cors)
        .with_observability()
        .with_recovery(&config.recovery)
}
