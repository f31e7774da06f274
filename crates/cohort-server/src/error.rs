//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use cohort_core::error::CohortError;

/// JSON body for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Newtype carrying core errors across the axum boundary.
#[derive(Debug)]
pub struct ApiError(pub CohortError);

impl From<CohortError> for ApiError {
    fn from(err: CohortError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            CohortError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CohortError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CohortError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            CohortError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        // Expected conditions echo their message; internal failures are
        // logged with detail and surfaced generically.
        let message = if self.0.is_expected() {
            self.0.to_string()
        } else {
            error!(detail = %self.0, "internal error");
            "internal error".into()
        };

        let body = ErrorResponse {
            error: error.into(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
