use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::errors::ProcessorError;
use crate::models::ProcessRequest;

pub const SERVICE_NAME: &str = "Resmî Gazete PDF İşleyici";

pub const ENDPOINTS: [&str; 3] = [
    "/process-pdf (POST)",
    "/result/<job_id> (GET)",
    "/health (GET)",
];

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: &'static str,
    pub job_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub endpoints: Vec<&'static str>,
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message,
            message: None,
        }),
    )
        .into_response()
}

fn store_error(err: ProcessorError) -> Response {
    match err {
        ProcessorError::Conflict(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "conflict".to_string(),
                message: Some(msg),
            }),
        )
            .into_response(),
        other => internal_error(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn home() -> impl IntoResponse {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "ready",
        endpoints: ENDPOINTS.to_vec(),
    })
}

/// POST /process-pdf
///
/// Any body that does not parse as a `ProcessRequest` is answered with 500
/// and the parser's message.
pub async fn process_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected /process-pdf request: {}", rejection.body_text());
            return internal_error(rejection.body_text());
        }
    };

    let job_id = match request.job_id {
        Some(id) if !id.is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };

    if let Err(e) = state.store.reserve(&job_id).await {
        tracing::warn!("Job '{}' not started: {}", job_id, e);
        return store_error(e);
    }

    tracing::info!("Job '{}' accepted for {}", job_id, request.pdf_url);
    state.runner.spawn(job_id.clone(), request.pdf_url);

    let message = format!(
        "PDF processing started. Poll /result/{} for the outcome.",
        job_id
    );
    (
        StatusCode::OK,
        Json(AcceptedResponse {
            status: "processing",
            job_id,
            message,
        }),
    )
        .into_response()
}

/// GET /result/{job_id}
///
/// A job that is still running has no record and is reported exactly like an
/// unknown id.
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Response {
    match state.store.get(&job_id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => {
            tracing::debug!("No result for job '{}'", job_id);
            (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    status: "not_found",
                    message: format!("Job ID ({}) not found.", job_id),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to read result for job '{}': {}", job_id, e);
            internal_error(e.to_string())
        }
    }
}
