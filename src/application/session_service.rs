//! SessionService - boundary façade for external callers.
//!
//! Composes the command/query handlers with the result broadcaster so that
//! transports only need one object. It holds no state of its own; the store
//! and broadcaster are passed in and shared.

use std::sync::Arc;

use crate::domain::foundation::{OptionId, SessionId};
use crate::domain::session::{Session, SessionError, SessionSummary, Tally};
use crate::ports::{ResultBroadcaster, SessionStore, Subscription};

use super::handlers::{
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, SubmitVoteCommand, SubmitVoteHandler, SubmitVoteResult,
};

/// Snapshot plus the live feed that continues from it.
#[derive(Debug)]
pub struct LiveResults {
    /// Tally at subscription time.
    pub initial: Tally,
    /// Updates newer than `initial`.
    pub subscription: Subscription,
}

/// Façade over session creation, lookup, voting and live results.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    broadcaster: Arc<dyn ResultBroadcaster>,
    create_handler: CreateSessionHandler,
    get_handler: GetSessionHandler,
    list_handler: ListSessionsHandler,
    vote_handler: SubmitVoteHandler,
}

impl SessionService {
    pub fn new<B>(store: Arc<dyn SessionStore>, broadcaster: Arc<B>) -> Self
    where
        B: ResultBroadcaster + 'static,
    {
        Self {
            create_handler: CreateSessionHandler::new(store.clone()),
            get_handler: GetSessionHandler::new(store.clone()),
            list_handler: ListSessionsHandler::new(store.clone()),
            vote_handler: SubmitVoteHandler::new(store.clone(), broadcaster.clone()),
            store,
            broadcaster,
        }
    }

    /// Create a session from a title, optional description and option texts.
    pub async fn create_session(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        options: Vec<String>,
    ) -> Result<Session, SessionError> {
        let cmd = CreateSessionCommand {
            title: title.into(),
            description,
            options,
        };
        Ok(self.create_handler.handle(cmd).await?.session)
    }

    /// Summaries of every session, oldest first.
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        self.list_handler.handle().await
    }

    pub async fn get_session(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        self.get_handler
            .handle(GetSessionQuery {
                session_id: *session_id,
            })
            .await
    }

    pub async fn cast_vote(
        &self,
        session_id: &SessionId,
        option_id: OptionId,
    ) -> Result<SubmitVoteResult, SessionError> {
        self.vote_handler
            .handle(SubmitVoteCommand {
                session_id: *session_id,
                option_id,
            })
            .await
    }

    /// Open a live feed of tallies for an existing session.
    ///
    /// The current tally is not replayed; see [`SessionService::watch_results`].
    pub async fn stream_results(&self, session_id: &SessionId) -> Result<Subscription, SessionError> {
        self.store.get(session_id).await?;
        Ok(self.broadcaster.subscribe(session_id).await)
    }

    /// Subscribe, then read the current tally.
    ///
    /// Subscribing first means no vote can fall between the snapshot and the
    /// feed; votes already reflected in the snapshot are skipped by the feed.
    pub async fn watch_results(&self, session_id: &SessionId) -> Result<LiveResults, SessionError> {
        let mut subscription = self.broadcaster.subscribe(session_id).await;

        let session = match self.store.get(session_id).await {
            Ok(session) => session,
            Err(e) => {
                self.broadcaster.unsubscribe(&mut subscription).await;
                return Err(e);
            }
        };

        let initial = session.tally().clone();
        subscription.seed(&initial);

        tracing::debug!(
            session_id = %session_id,
            subscription_id = %subscription.id(),
            total = initial.total(),
            "Watching results"
        );

        Ok(LiveResults {
            initial,
            subscription,
        })
    }

    /// Close a subscription. Idempotent.
    pub async fn unsubscribe(&self, subscription: &mut Subscription) {
        self.broadcaster.unsubscribe(subscription).await;
    }

    /// Number of sessions held by the store.
    pub async fn session_count(&self) -> usize {
        self.store.count().await
    }

    /// Number of open subscriptions for a session.
    pub async fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.broadcaster.subscriber_count(session_id).await
    }
}
