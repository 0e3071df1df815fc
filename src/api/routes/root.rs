use axum::Json;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Health check confirming the gateway is up.
pub async fn health() -> Json<HealthResponse> {
    debug!("Backend running successfully");
    Json(HealthResponse {
        message: "Backend running successfully, ready to use other endpoints".to_string(),
    })
}
