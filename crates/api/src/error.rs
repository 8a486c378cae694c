//! HTTP Error Mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use data_validator::ValidationFailure;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;

/// Error body shape shared by every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors a request handler can surface
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body failed to deserialize
    #[error("{0}")]
    BadRequest(String),

    /// Domain validation rejected the record
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The pipeline rejected or failed the prediction
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Validation(failure) => (StatusCode::BAD_REQUEST, failure.to_string()),
            // Column or type mismatches mean the caller-facing schema and
            // the artifact disagree, surfaced like the other input errors.
            ApiError::Inference(
                e @ (InferenceError::SchemaMismatch { .. } | InferenceError::TypeMismatch { .. }),
            ) => (
                StatusCode::BAD_REQUEST,
                format!("Prediction failed: {}", e),
            ),
            // Artifact-internal failures are server-side defects, not
            // something the caller can correct.
            ApiError::Inference(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction failed: {}", e),
            ),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
