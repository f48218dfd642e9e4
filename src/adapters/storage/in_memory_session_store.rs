//! In-Memory Session Store Adapter
//!
//! Keeps every session in process memory for the lifetime of the store.
//! Each session sits behind its own mutex so votes on one session are
//! serialized while other sessions proceed independently.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{OptionId, SessionId};
use crate::domain::session::{Session, SessionError, SessionSummary, Tally};
use crate::ports::SessionStore;

#[derive(Default)]
struct Registry {
    sessions: HashMap<SessionId, Arc<Mutex<Session>>>,
    /// Summaries in creation order. Summary fields never change after creation.
    summaries: Vec<SessionSummary>,
}

/// In-memory registry of sessions.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    registry: Arc<RwLock<Registry>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cell for a session without holding the registry lock afterwards.
    async fn cell(&self, id: &SessionId) -> Result<Arc<Mutex<Session>>, SessionError> {
        self.registry
            .read()
            .await
            .sessions
            .get(id)
            .cloned()
            .ok_or(SessionError::NotFound(*id))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        option_texts: &[String],
    ) -> Result<Session, SessionError> {
        let mut registry = self.registry.write().await;

        let mut id = SessionId::new();
        while registry.sessions.contains_key(&id) {
            id = SessionId::new();
        }

        let session = Session::new(id, title, description, option_texts)?;
        registry.summaries.push(session.summary());
        registry
            .sessions
            .insert(id, Arc::new(Mutex::new(session.clone())));

        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Result<Session, SessionError> {
        let cell = self.cell(id).await?;
        let session = cell.lock().await;
        Ok(session.clone())
    }

    async fn list(&self) -> Vec<SessionSummary> {
        self.registry.read().await.summaries.clone()
    }

    async fn record_vote(
        &self,
        id: &SessionId,
        option_id: &OptionId,
    ) -> Result<Tally, SessionError> {
        let cell = self.cell(id).await?;
        let mut session = cell.lock().await;
        session.record_vote(option_id)
    }

    async fn count(&self) -> usize {
        self.registry.read().await.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_session() {
        let store = InMemorySessionStore::new();

        let created = store
            .create("Lunch?", None, &texts(&["Pizza", "Sushi"]))
            .await
            .unwrap();
        let fetched = store.get(created.id()).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.tally().total(), 0);
    }

    #[tokio::test]
    async fn create_rejects_too_few_options() {
        let store = InMemorySessionStore::new();

        let result = store.create("Solo", None, &texts(&["Only", " "])).await;

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.get(&id).await;

        assert_eq!(result, Err(SessionError::NotFound(id)));
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let store = InMemorySessionStore::new();
        let options = texts(&["A", "B"]);

        let first = store.create("First", Some("one"), &options).await.unwrap();
        let second = store.create("Second", None, &options).await.unwrap();
        let third = store.create("Third", None, &options).await.unwrap();

        let listed: Vec<SessionId> = store.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(listed, vec![*first.id(), *second.id(), *third.id()]);
        assert_eq!(store.list().await[0].description.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn record_vote_updates_stored_tally() {
        let store = InMemorySessionStore::new();
        let session = store.create("T", None, &texts(&["A", "B"])).await.unwrap();
        let first = OptionId::new("1");

        store.record_vote(session.id(), &first).await.unwrap();
        let tally = store.record_vote(session.id(), &first).await.unwrap();

        assert_eq!(tally.count(&first), Some(2));
        assert_eq!(store.get(session.id()).await.unwrap().tally(), &tally);
    }

    #[tokio::test]
    async fn record_vote_on_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.record_vote(&id, &OptionId::new("1")).await;

        assert_eq!(result, Err(SessionError::NotFound(id)));
    }

    #[tokio::test]
    async fn record_vote_on_unknown_option_is_not_found() {
        let store = InMemorySessionStore::new();
        let session = store.create("T", None, &texts(&["A", "B"])).await.unwrap();

        let result = store.record_vote(session.id(), &OptionId::new("3")).await;

        assert!(matches!(result, Err(SessionError::OptionNotFound { .. })));
        assert_eq!(store.get(session.id()).await.unwrap().tally().total(), 0);
    }

    #[tokio::test]
    async fn concurrent_votes_are_not_lost() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create("T", None, &texts(&["A", "B"])).await.unwrap();
        let id = *session.id();

        let mut handles = Vec::new();
        for i in 0..200 {
            let store = Arc::clone(&store);
            let option = OptionId::from_position(i % 2);
            handles.push(tokio::spawn(async move {
                store.record_vote(&id, &option).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let tally = store.get(&id).await.unwrap().tally().clone();
        assert_eq!(tally.total(), 200);
        assert_eq!(tally.count(&OptionId::new("1")), Some(100));
        assert_eq!(tally.count(&OptionId::new("2")), Some(100));
    }

    #[tokio::test]
    async fn session_ids_are_unique() {
        let store = InMemorySessionStore::new();
        let options = texts(&["A", "B"]);

        let mut ids = std::collections::HashSet::new();
        for _ in 0..50 {
            let session = store.create("T", None, &options).await.unwrap();
            assert!(ids.insert(*session.id()));
        }
        assert_eq!(store.count().await, 50);
    }
}
