//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;
mod streaming;

pub use dto::{
    CreateSessionRequest, ErrorResponse, OptionResponse, RawOptionId, SessionCreatedResponse,
    SessionResponse, SessionSummaryResponse, VoteRequest, VoteResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
