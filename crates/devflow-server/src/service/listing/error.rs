use devflow_store::StoreError;

use super::InvalidParams;

/// Failure of a listing action.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The request parameters broke one or more rules.
    #[error("{0}")]
    Validation(#[from] InvalidParams),

    /// The document store could not answer.
    #[error("document store failure: {0}")]
    Infrastructure(#[from] StoreError),
}

impl ListingError {
    /// Returns whether the failure is a store failure that may clear on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Infrastructure(error) if error.is_transient())
    }
}
