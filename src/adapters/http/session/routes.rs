//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{cast_vote, create_session, get_session, list_sessions, SessionHandlers};
use super::streaming::stream_results;

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/vote", post(cast_vote))
        .route("/:id/results/stream", get(stream_results))
        .with_state(handlers)
}
