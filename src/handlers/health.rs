//! Health check handler

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// The process only reaches serving with a loaded model, so the status
/// string is fixed.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Model loaded successfully",
    })
}
