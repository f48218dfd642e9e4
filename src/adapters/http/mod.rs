//! HTTP adapters - REST API and live result stream.
//!
//! | Method | Path                           | Handler          |
//! |--------|--------------------------------|------------------|
//! | GET    | `/health`                      | liveness         |
//! | GET    | `/sessions`                    | list sessions    |
//! | POST   | `/sessions`                    | create session   |
//! | GET    | `/sessions/:id`                | session + tally  |
//! | POST   | `/sessions/:id/vote`           | cast vote        |
//! | GET    | `/sessions/:id/results/stream` | SSE tally stream |

pub mod health;
pub mod session;

use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::SessionService;
use crate::config::AppConfig;

pub use health::health_routes;
pub use session::{session_routes, SessionHandlers};

/// Build the full application router with CORS and request tracing.
pub fn api_router(service: Arc<SessionService>, config: &AppConfig) -> Router {
    let handlers = SessionHandlers::new(service.clone(), config.broadcast.keep_alive());

    Router::new()
        .merge(health_routes(service))
        .nest("/sessions", session_routes(handlers))
        .layer(cors_layer(&config.server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Allow the configured origins, or any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
