//! SubmitVoteHandler - the vote engine.
//!
//! Validates a single vote against its session, records it, and pushes the
//! resulting tally to live subscribers.
//!
//! No voter identity is tracked: every accepted call adds one vote.

use std::sync::Arc;

use crate::domain::foundation::{OptionId, SessionId};
use crate::domain::session::{SessionError, Tally};
use crate::ports::{SessionStore, TallyPublisher};

/// Command to cast one vote.
#[derive(Debug, Clone)]
pub struct SubmitVoteCommand {
    pub session_id: SessionId,
    pub option_id: OptionId,
}

/// Result of an accepted vote.
#[derive(Debug, Clone)]
pub struct SubmitVoteResult {
    pub option_id: OptionId,
    /// Count for the voted option right after this vote.
    pub new_count: u64,
    /// Full tally right after this vote.
    pub tally: Tally,
    /// Subscribers the tally was queued for.
    pub notified: usize,
}

/// Handler for vote submissions.
pub struct SubmitVoteHandler {
    store: Arc<dyn SessionStore>,
    publisher: Arc<dyn TallyPublisher>,
}

impl SubmitVoteHandler {
    pub fn new(store: Arc<dyn SessionStore>, publisher: Arc<dyn TallyPublisher>) -> Self {
        Self { store, publisher }
    }

    pub async fn handle(&self, cmd: SubmitVoteCommand) -> Result<SubmitVoteResult, SessionError> {
        // 1. Session must exist
        let session = self.store.get(&cmd.session_id).await?;

        // 2. Option must belong to it
        if !session.has_option(&cmd.option_id) {
            tracing::warn!(
                session_id = %cmd.session_id,
                option_id = %cmd.option_id,
                "Vote for unknown option"
            );
            return Err(SessionError::UnknownOption {
                session: cmd.session_id,
                option: cmd.option_id,
            });
        }

        // 3. Record
        let tally = self
            .store
            .record_vote(&cmd.session_id, &cmd.option_id)
            .await?;
        let new_count = tally.count(&cmd.option_id).unwrap_or_default();

        // 4. Notify live subscribers
        let notified = self.publisher.publish(&cmd.session_id, &tally).await;

        tracing::debug!(
            session_id = %cmd.session_id,
            option_id = %cmd.option_id,
            new_count,
            notified,
            "Vote recorded"
        );

        Ok(SubmitVoteResult {
            option_id: cmd.option_id,
            new_count,
            tally,
            notified,
        })
    }
}
