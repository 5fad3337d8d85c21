use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use devflow_store::{Fixtures, MemoryStore, PgConfig, Store, run_pending_migrations};
use serde::{Deserialize, Serialize};

use crate::service::{Error, Result, TRACING_TARGET};

/// Document store executor the service lists from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process collections, empty unless seeded.
    #[default]
    Memory,
    /// PostgreSQL through a pooled connection.
    Postgres,
}

impl StoreBackend {
    /// Returns the backend name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Document store backend.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "store",
            env = "STORE_BACKEND",
            value_enum,
            default_value_t = StoreBackend::Memory
        )
    )]
    #[serde(default)]
    pub backend: StoreBackend,

    /// JSON fixture file loaded into the store at start-up.
    #[cfg_attr(feature = "config", arg(long = "seed", env = "SEED_FILE"))]
    #[serde(default)]
    pub seed: Option<PathBuf>,

    /// PostgreSQL settings, used by the `postgres` backend only.
    #[cfg_attr(feature = "config", command(flatten))]
    pub postgres: PgConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            seed: None,
            postgres: PgConfig::new(""),
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration for the in-memory backend.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Creates a configuration for the PostgreSQL backend.
    pub fn postgres(config: PgConfig) -> Self {
        Self {
            backend: StoreBackend::Postgres,
            postgres: config,
            ..Self::default()
        }
    }

    /// Sets the fixture file to seed the store with.
    pub fn with_seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed = Some(path.into());
        self
    }

    /// Validates the settings of the selected backend.
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::Postgres => self.postgres.validate().map_err(Into::into),
        }
    }

    /// Opens the selected store, migrating PostgreSQL when needed.
    pub async fn connect_store(&self) -> Result<Store> {
        self.validate()?;

        let store = match self.backend {
            StoreBackend::Memory => Store::from(MemoryStore::new()),
            StoreBackend::Postgres => {
                let client = self.postgres.clone().build().map_err(|e| {
                    Error::store("Failed to create database client").with_source(e)
                })?;

                let migrations = run_pending_migrations(&client).await.map_err(|e| {
                    Error::store("Failed to apply database migrations").with_source(e)
                })?;

                tracing::info!(
                    target: TRACING_TARGET,
                    applied = migrations.processed_versions.len(),
                    "Database migrations checked"
                );

                Store::from(client)
            }
        };

        tracing::info!(
            target: TRACING_TARGET,
            backend = %self.backend,
            "Document store connected"
        );

        Ok(store)
    }

    /// Loads the configured fixture file into `store`, if any.
    pub async fn seed_store(&self, store: &Store) -> Result<()> {
        let Some(path) = self.seed.as_deref() else {
            return Ok(());
        };

        let fixtures = Fixtures::from_path(path).await?;
        let report = fixtures.apply(store).await?;

        tracing::info!(
            target: TRACING_TARGET,
            path = %path.display(),
            tags = report.tags,
            questions = report.questions,
            "Document store seeded"
        );

        Ok(())
    }
}
