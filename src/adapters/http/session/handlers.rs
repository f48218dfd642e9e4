//! HTTP handlers for session endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::SessionService;
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{
    CreateSessionRequest, ErrorResponse, SessionCreatedResponse, SessionResponse,
    SessionSummaryResponse, VoteRequest, VoteResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub(super) service: Arc<SessionService>,
    pub(super) keep_alive: Duration,
}

impl SessionHandlers {
    pub fn new(service: Arc<SessionService>, keep_alive: Duration) -> Self {
        Self {
            service,
            keep_alive,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return handle_rejection(rejection),
    };

    match handlers
        .service
        .create_session(req.title, req.description, req.options)
        .await
    {
        Ok(session) => {
            let response = SessionCreatedResponse::from(&session);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /sessions - List all sessions
pub async fn list_sessions(State(handlers): State<SessionHandlers>) -> Response {
    let items: Vec<SessionSummaryResponse> = handlers
        .service
        .list_sessions()
        .await
        .into_iter()
        .map(Into::into)
        .collect();
    (StatusCode::OK, Json(items)).into_response()
}

/// GET /sessions/:id - Get session details with current tally
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.service.get_session(&session_id).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /sessions/:id/vote - Cast one vote
pub async fn cast_vote(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return handle_rejection(rejection),
    };

    match handlers
        .service
        .cast_vote(&session_id, req.option_id.into())
        .await
    {
        Ok(result) => (StatusCode::OK, Json(VoteResponse::from(result))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Parse a path segment as a session id.
///
/// A malformed id cannot name any session, so it is reported as not found.
pub(super) fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::session_not_found(raw)),
        )
            .into_response()
    })
}

fn handle_rejection(rejection: JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}

pub(super) fn handle_session_error(error: SessionError) -> Response {
    let status = match &error {
        SessionError::InvalidSession(_) => StatusCode::BAD_REQUEST,
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::OptionNotFound { .. } => StatusCode::NOT_FOUND,
        SessionError::UnknownOption { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(ErrorResponse::new(error.code(), error.to_string()))).into_response()
}
