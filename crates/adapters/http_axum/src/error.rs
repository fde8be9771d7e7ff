//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use domus_domain::error::{DomusError, UnavailableError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DomusError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(DomusError);

impl From<DomusError> for ApiError {
    fn from(err: DomusError) -> Self {
        Self(err)
    }
}

impl From<UnavailableError> for ApiError {
    fn from(err: UnavailableError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomusError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DomusError::Unavailable(err) => {
                tracing::debug!(error = %err, "resource unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            DomusError::Upstream(err) => {
                tracing::error!(
                    collaborator = %err.collaborator,
                    error = %err.source,
                    "upstream collaborator failed"
                );
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
