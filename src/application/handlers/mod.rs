//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod session;
pub mod vote;

pub use session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionHandler,
    GetSessionQuery, ListSessionsHandler,
};
pub use vote::{SubmitVoteCommand, SubmitVoteHandler, SubmitVoteResult};
