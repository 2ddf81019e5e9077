pub mod health;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::daemon::runner::JobRunner;
use crate::storage::ResultStore;

/// Shared application state for the Axum server.
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub runner: Arc<JobRunner>,
}

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(health::health_check))
        .route("/process-pdf", post(routes::process_pdf))
        .route("/result/{job_id}", get(routes::get_result))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}
