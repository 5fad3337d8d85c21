//! Listener, shutdown drain and request pipeline settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{bail, ensure};
use clap::Args;
use devflow_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

const SHUTDOWN_TIMEOUT_SECS: RangeInclusive<u64> = 1..=300;

/// How the listing server listens, drains and layers its routes.
///
/// ```bash
/// devflow --host 0.0.0.0 --port 8080 --shutdown-timeout 10 --request-timeout 5
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds in-flight listings get to finish after SIGINT or SIGTERM (1-300).
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,

    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            shutdown_timeout: 30,
            cors: CorsConfig::default(),
            openapi: OpenApiConfig::default(),
            recovery: RecoveryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port < 1024 {
            bail!("port {} needs root privileges, pick one in 1024-65535", self.port);
        }

        ensure!(
            SHUTDOWN_TIMEOUT_SECS.contains(&self.shutdown_timeout),
            "shutdown timeout of {}s is outside 1-300s",
            self.shutdown_timeout
        );
        ensure!(
            self.recovery.request_timeout > 0,
            "request timeout must be at least 1s"
        );

        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether a listing can still be running when the drain ends.
    #[must_use]
    pub fn drain_cuts_requests(&self) -> bool {
        self.recovery.request_timeout > self.shutdown_timeout
    }

    #[must_use]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            shutdown_timeout_secs = self.shutdown_timeout,
            request_timeout_secs = self.recovery.request_timeout,
            cors_origins = ?self.cors.allowed_origins,
            openapi = %self.openapi.open_api_json,
            scalar = %self.openapi.scalar_ui,
            "Server configuration"
        );

        if self.drain_cuts_requests() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "Request timeout exceeds the shutdown timeout, slow listings may be cut"
            );
        }
    }
}
