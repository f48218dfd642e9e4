//! Session store port.
//!
//! Defines the contract for the registry that owns every session record.
//! The store is the only component allowed to mutate a tally.
//!
//! # Design
//!
//! - **Owned, not global**: callers hold the store explicitly (usually `Arc<dyn SessionStore>`)
//! - **Per-session serialization**: `record_vote` calls on one session never interleave
//! - **Independent sessions**: different sessions can be mutated concurrently

use async_trait::async_trait;

use crate::domain::foundation::{OptionId, SessionId};
use crate::domain::session::{Session, SessionError, SessionSummary, Tally};

/// Registry port for session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create and register a new session.
    ///
    /// Generates a fresh session id and per-option ids, and zeroes the tally.
    ///
    /// # Errors
    ///
    /// - `InvalidSession` if fewer than two non-blank option texts are given,
    ///   or the title is blank or too long
    async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        option_texts: &[String],
    ) -> Result<Session, SessionError>;

    /// Fetch a copy of a session, tally included.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    async fn get(&self, id: &SessionId) -> Result<Session, SessionError>;

    /// List session summaries in creation order.
    async fn list(&self) -> Vec<SessionSummary>;

    /// Add one vote and return the tally as it stands right after.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `OptionNotFound` if the option is not part of the session
    async fn record_vote(&self, id: &SessionId, option_id: &OptionId)
        -> Result<Tally, SessionError>;

    /// Number of sessions held.
    async fn count(&self) -> usize;
}
