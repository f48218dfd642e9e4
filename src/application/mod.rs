//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers
//! (read); `SessionService` bundles them for transports.

pub mod handlers;
mod session_service;

pub use handlers::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionHandler,
    GetSessionQuery, ListSessionsHandler, SubmitVoteCommand, SubmitVoteHandler,
    SubmitVoteResult,
};
pub use session_service::{LiveResults, SessionService};
