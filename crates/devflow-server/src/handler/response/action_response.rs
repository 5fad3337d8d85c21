use schemars::JsonSchema;
use serde::Serialize;

use super::ErrorResponse;

/// Envelope returned by every listing action.
///
/// `data` is present only when `success` is true, `error` only when it is
/// false.
#[must_use]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ActionResponse<T = ()> {
    /// Whether the action succeeded.
    pub success: bool,
    /// The action result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse<'static>>,
}

impl<T> ActionResponse<T> {
    /// Creates a successful envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failed envelope.
    pub fn failure(error: ErrorResponse<'static>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_omits_error() -> anyhow::Result<()> {
        let envelope = ActionResponse::success(vec![1, 2]);
        let value = serde_json::to_value(&envelope)?;
        assert_eq!(value, json!({ "success": true, "data": [1, 2] }));
        Ok(())
    }

    #[test]
    fn failure_envelope_omits_data() -> anyhow::Result<()> {
        let envelope: ActionResponse = ActionResponse::failure(
            ErrorResponse::VALIDATION_ERROR.with_message("Page must be at least 1"),
        );
        let value = serde_json::to_value(&envelope)?;
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": { "name": "validation_error", "message": "Page must be at least 1" }
            })
        );
        Ok(())
    }
}
