//! HTTP gateway (axum) for answer-key comparison.
//!
//! One route does the real work: `POST /analyze` takes a multipart form with
//! the teacher's answer key and any number of student submissions, and
//! responds with per-question similarity scores. `GET /` and `GET /healthz`
//! are liveness plumbing for load balancers and container health checks.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::GatewayError;
pub use handler::analyze_handler;
pub use payload::AnalyzeResponse;
pub use state::HandlerState;

use crate::extract::TextExtractor;

pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: TextExtractor + 'static,
{
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(liveness_handler))
        .route("/healthz", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub embedder: &'static str,
}

#[tracing::instrument]
pub async fn liveness_handler() -> &'static str {
    "keyscore answer evaluation service is running"
}

#[tracing::instrument(skip(state))]
pub async fn health_handler<E>(State(state): State<HandlerState<E>>) -> Json<HealthResponse>
where
    E: TextExtractor + 'static,
{
    let embedder = if state.embedder.is_stub() {
        "stub"
    } else {
        "model"
    };

    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        embedder,
    })
}
