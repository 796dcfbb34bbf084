//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::model::InferenceError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level failures, mapped to distinct HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body or wrong-shape input
    #[error("{0}")]
    Validation(String),

    /// Model inference failed
    #[error("{0}")]
    Inference(#[from] InferenceError),

    /// Test dataset could not be sampled
    #[error("{0}")]
    Dataset(String),

    /// Filesystem error
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(msg) => {
                tracing::error!("Inference error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Dataset(msg) => {
                tracing::error!("Dataset error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Io(err) => {
                tracing::error!("I/O error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
