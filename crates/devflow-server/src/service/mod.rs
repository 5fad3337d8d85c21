//! Application state and dependency injection.

mod config;
pub mod listing;

use devflow_store::Store;

pub use crate::service::config::{ServiceConfig, StoreBackend};
pub use crate::service::listing::{
    InvalidParams, ListingError, ListingParams, ListingRequest, ListingResolver, QuestionListing,
    Violation,
};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Tracing target for service assembly.
pub(crate) const TRACING_TARGET: &str = "devflow_server::service";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub store: Store,
    pub listings: ListingResolver,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the configured store and seeds it when a fixture file is set.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let store = service_config.connect_store().await?;
        service_config.seed_store(&store).await?;
        Ok(Self::from_store(store))
    }

    /// Builds application state over an already connected store.
    pub fn from_store(store: impl Into<Store>) -> Self {
        let store = store.into();
        Self {
            listings: ListingResolver::new(store.clone()),
            store,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(store: Store);
impl_di!(listings: ListingResolver);

#[cfg(test)]
pub(crate) mod test {
    use devflow_store::{Fixtures, MemoryStore};

    use super::ServiceState;

    /// Three questions and four tags shared by the listing tests.
    pub const FIXTURES: &str = r#"{
        "tags": [
            { "name": "javascript", "questions": 100, "createdAt": "2024-01-01T00:00:00Z" },
            { "name": "react", "questions": 50, "createdAt": "2024-01-02T00:00:00Z" },
            { "name": "node", "questions": 200, "createdAt": "2024-01-03T00:00:00Z" },
            { "name": "java", "questions": 60, "createdAt": "2024-01-04T00:00:00Z" }
        ],
        "questions": [
            {
                "title": "How to use React hooks?",
                "content": "useState and useEffect",
                "tags": ["react", "javascript"],
                "upvotes": 50,
                "answers": 5,
                "createdAt": "2024-01-01T00:00:00Z"
            },
            {
                "title": "JavaScript async/await explained",
                "content": "Promises and async functions",
                "tags": ["javascript"],
                "upvotes": 100,
                "answers": 0,
                "createdAt": "2024-02-01T00:00:00Z"
            },
            {
                "title": "Node.js best practices",
                "content": "Structure your Node application",
                "tags": ["node", "javascript"],
                "upvotes": 75,
                "answers": 3,
                "createdAt": "2024-03-01T00:00:00Z"
            }
        ]
    }"#;

    /// Returns an in-memory store loaded with [`FIXTURES`].
    pub async fn seeded_store() -> anyhow::Result<MemoryStore> {
        let store = MemoryStore::new();
        Fixtures::from_json(FIXTURES)?.apply(&store).await?;
        Ok(store)
    }

    /// Returns application state over [`seeded_store`].
    pub async fn seeded_state() -> anyhow::Result<ServiceState> {
        Ok(ServiceState::from_store(seeded_store().await?))
    }
}
