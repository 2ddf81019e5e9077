use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

pub const SERVICE_ID: &str = "resmi-gazete-processor";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check");

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            service: SERVICE_ID,
        }),
    )
}
