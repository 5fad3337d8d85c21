use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

use super::ActionResponse;

/// Tracing target for rendered error responses.
const TRACING_TARGET: &str = "devflow_server::handler::response";

/// The `error` object of a failed [`ActionResponse`].
///
/// Only `name`, `message` and `resource` reach the client. The status picks
/// the HTTP code the envelope is sent with, the context is only logged.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Stable machine-readable name, e.g. `validation_error`.
    pub name: Cow<'a, str>,
    /// Message safe for client display.
    pub message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,

    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    /// Body the extractors answer with when a query string or JSON body
    /// cannot be read at all.
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be read.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "No listing is served at this path.",
        StatusCode::NOT_FOUND,
    );
    /// Replaced by the joined violation messages of the listing parameters.
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "Invalid listing parameters.",
        StatusCode::BAD_REQUEST,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "The listing could not be produced.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "The document store is unavailable, try again later.",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// Names the collection the failure concerns.
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Adds internal context, appended after any context already attached.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(existing) => Cow::Owned(format!("{existing}; {context}")),
            None => context,
        });
        self
    }

    fn into_owned(self) -> ErrorResponse<'static> {
        ErrorResponse {
            name: Cow::Owned(self.name.into_owned()),
            message: Cow::Owned(self.message.into_owned()),
            resource: self.resource.map(|r| Cow::Owned(r.into_owned())),
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
            status: self.status,
        }
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        // Rejected listing parameters are routine, store failures are not.
        if self.status.is_server_error() {
            tracing::error!(
                target: TRACING_TARGET,
                status = self.status.as_u16(),
                name = %self.name,
                context = ?self.context,
                "Listing failed"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                status = self.status.as_u16(),
                name = %self.name,
                message = %self.message,
                "Listing request rejected"
            );
        }

        let status = self.status;
        let envelope: ActionResponse = ActionResponse::failure(self.into_owned());
        (status, Json(envelope)).into_response()
    }
}
