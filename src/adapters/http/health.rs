//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::application::SessionService;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// GET /health
async fn health(State(service): State<Arc<SessionService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: service.session_count().await,
    })
}

pub fn health_routes(service: Arc<SessionService>) -> Router {
    Router::new().route("/health", get(health)).with_state(service)
}
