//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, OptionId, SessionId};

/// Errors raised by session creation, lookup and voting.
///
/// All variants are recoverable at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Creation constraints were violated.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// No session with this id exists.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// The store has no such option for the session.
    #[error("Option {option} not found in session {session}")]
    OptionNotFound { session: SessionId, option: OptionId },

    /// The vote referenced an option outside the session's option set.
    #[error("Unknown option {option} for session {session}")]
    UnknownOption { session: SessionId, option: OptionId },
}

impl SessionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SessionError::InvalidSession(message.into())
    }

    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::InvalidSession(_) => ErrorCode::InvalidSession,
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::OptionNotFound { .. } => ErrorCode::OptionNotFound,
            SessionError::UnknownOption { .. } => ErrorCode::UnknownOption,
        }
    }
}
