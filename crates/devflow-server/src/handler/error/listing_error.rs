use crate::handler::{Error, ErrorKind};
use crate::service::ListingError;

impl From<ListingError> for Error<'static> {
    fn from(error: ListingError) -> Self {
        match error {
            ListingError::Validation(invalid) => {
                ErrorKind::ValidationError.with_message(invalid.message())
            }
            ListingError::Infrastructure(store_error) => store_error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use devflow_store::StoreError;
    use devflow_store::error::TimeoutType;

    use super::*;
    use crate::service::ListingParams;

    #[test]
    fn validation_carries_aggregated_message() -> anyhow::Result<()> {
        let invalid = ListingParams::for_page(0, 0)
            .validate()
            .err()
            .ok_or_else(|| anyhow::anyhow!("params were accepted"))?;

        let error = Error::from(ListingError::from(invalid));
        assert_eq!(error.kind(), ErrorKind::ValidationError);
        assert_eq!(
            error.message(),
            Some("Page must be at least 1, Page size must be at least 1")
        );
        Ok(())
    }

    #[test]
    fn infrastructure_maps_by_store_error() {
        let error = Error::from(ListingError::from(StoreError::Timeout(TimeoutType::Create)));
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
    }
}
