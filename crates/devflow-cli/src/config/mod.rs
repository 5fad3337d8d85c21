//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, shutdown drain, CORS, OpenAPI, request timeout
//! └── service: ServiceConfig  # Store backend, seed file, PostgreSQL pool
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! devflow --store postgres --postgres-url "postgresql://..." --port 8080
//!
//! # Or via environment variables
//! STORE_BACKEND=postgres POSTGRES_URL="postgresql://..." PORT=8080 devflow
//! ```

mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use devflow_server::service::{ServiceConfig, StoreBackend};
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "devflow")]
#[command(about = "Question and tag listing server")]
#[command(version)]
pub struct Cli {
    /// Emits logs as JSON lines instead of human-readable text.
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    #[serde(default)]
    pub log_json: bool,

    /// Listener, shutdown and request pipeline configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Document store configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its variables
    /// act as `env` defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        if self.log_json {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid document store configuration")?;
        Ok(())
    }

    /// Logs configuration at info level (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        match self.service.backend {
            StoreBackend::Memory => {
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    backend = %self.service.backend,
                    seed = ?self.service.seed,
                    "Document store configuration"
                );
            }
            StoreBackend::Postgres => {
                let postgres = &self.service.postgres;
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    backend = %self.service.backend,
                    seed = ?self.service.seed,
                    postgres_url = %postgres.database_url_masked(),
                    postgres_max_connections = postgres.postgres_max_connections,
                    postgres_connection_timeout_secs = ?postgres.postgres_connection_timeout_secs,
                    postgres_idle_timeout_secs = ?postgres.postgres_idle_timeout_secs,
                    "Document store configuration"
                );
            }
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
