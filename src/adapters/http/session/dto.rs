//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::SubmitVoteResult;
use crate::domain::foundation::{ErrorCode, OptionId};
use crate::domain::session::{PollOption, Session, SessionSummary, Tally};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub options: Vec<String>,
}

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub option_id: RawOptionId,
}

/// Option id as sent by clients: either `"2"` or `2`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawOptionId {
    Text(String),
    Number(u64),
}

impl From<RawOptionId> for OptionId {
    fn from(raw: RawOptionId) -> Self {
        match raw {
            RawOptionId::Text(text) => OptionId::new(text),
            RawOptionId::Number(n) => OptionId::new(n.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One option of a session.
#[derive(Debug, Clone, Serialize)]
pub struct OptionResponse {
    pub id: String,
    pub text: String,
}

impl From<&PollOption> for OptionResponse {
    fn from(option: &PollOption) -> Self {
        Self {
            id: option.id.to_string(),
            text: option.text.clone(),
        }
    }
}

/// Response for a newly created session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<OptionResponse>,
    pub created_at: String,
}

impl From<&Session> for SessionCreatedResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            title: session.title().to_string(),
            description: session.description().map(str::to_string),
            options: session.options().iter().map(Into::into).collect(),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<OptionResponse>,
    pub tally: Tally,
    pub total_votes: u64,
    pub created_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            description: session.description().map(str::to_string),
            options: session.options().iter().map(Into::into).collect(),
            tally: session.tally().clone(),
            total_votes: session.tally().total(),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}

/// Session summary for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            description: summary.description,
        }
    }
}

/// Acknowledgment of an accepted vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub option_id: String,
    pub new_count: u64,
    pub tally: Tally,
}

impl From<SubmitVoteResult> for VoteResponse {
    fn from(result: SubmitVoteResult) -> Self {
        Self {
            success: true,
            option_id: result.option_id.to_string(),
            new_count: result.new_count,
            tally: result.tally,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn session_not_found(id: &str) -> Self {
        Self::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
    }
}
