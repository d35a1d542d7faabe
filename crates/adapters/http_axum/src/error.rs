//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tidydo_domain::error::{TidyError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`TidyError`] to an HTTP response with appropriate status code.
pub struct ApiError(TidyError);

impl ApiError {
    /// A path or query identifier that does not parse.
    pub fn invalid_id(raw: &str) -> Self {
        Self(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl From<TidyError> for ApiError {
    fn from(err: TidyError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TidyError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            TidyError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            TidyError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
