//! Per-session rooms for live tally fan-out.
//!
//! Subscribers are grouped into rooms keyed by session id, each subscriber
//! owning a bounded queue:
//!
//! ```text
//! Room: session-123    Room: session-456
//! ├── sub-a            ├── sub-d
//! ├── sub-b            └── sub-e
//! └── sub-c
//! ```
//!
//! A vote on session-123 queues the new tally for a, b and c only.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::session::Tally;
use crate::ports::{Subscription, SubscriptionId, TallyPublisher, TallySubscriber};

type Room = HashMap<SubscriptionId, mpsc::Sender<Tally>>;

/// Default queue depth per subscriber.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 64;

/// Fans tally snapshots out to live subscribers, grouped by session.
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since publishes (reads) vastly
/// outnumber subscribes and unsubscribes (writes). Publishing never awaits a
/// subscriber: a queue that is full or closed gets its subscription closed
/// and pruned instead.
pub struct TallyBroadcaster {
    /// Map of session_id → subscribers in that room.
    rooms: RwLock<HashMap<SessionId, Room>>,

    /// Queue depth for each subscriber.
    capacity: usize,
}

impl TallyBroadcaster {
    /// Create a broadcaster with the given per-subscriber queue depth.
    ///
    /// A subscriber that falls `capacity` snapshots behind is disconnected.
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Create with default capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    /// Get all session ids that currently have subscribers.
    pub async fn active_sessions(&self) -> Vec<SessionId> {
        self.rooms.read().await.keys().copied().collect()
    }

    /// Get total count of subscribers across all rooms.
    pub async fn total_subscriber_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }

    async fn remove(&self, session_id: &SessionId, ids: &[SubscriptionId]) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(session_id) {
            for id in ids {
                room.remove(id);
            }
            if room.is_empty() {
                rooms.remove(session_id);
            }
        }
    }
}

impl Default for TallyBroadcaster {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl TallyPublisher for TallyBroadcaster {
    async fn publish(&self, session_id: &SessionId, tally: &Tally) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        {
            let rooms = self.rooms.read().await;
            let Some(room) = rooms.get(session_id) else {
                return 0;
            };
            for (id, sender) in room {
                match sender.try_send(tally.clone()) {
                    Ok(()) => delivered += 1,
                    Err(_) => dead.push(*id),
                }
            }
        }

        if !dead.is_empty() {
            tracing::debug!(
                session_id = %session_id,
                closed = dead.len(),
                "Closing subscribers that could not take a tally update"
            );
            self.remove(session_id, &dead).await;
        }

        delivered
    }
}

#[async_trait]
impl TallySubscriber for TallyBroadcaster {
    async fn subscribe(&self, session_id: &SessionId) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = SubscriptionId::new();

        self.rooms
            .write()
            .await
            .entry(*session_id)
            .or_default()
            .insert(id, sender);

        tracing::debug!(session_id = %session_id, subscription_id = %id, "Subscriber joined");
        Subscription::new(id, *session_id, receiver)
    }

    async fn unsubscribe(&self, subscription: &mut Subscription) {
        subscription.close();
        self.remove(subscription.session_id(), &[subscription.id()])
            .await;
    }

    async fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.rooms
            .read()
            .await
            .get(session_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OptionId;
    use crate::ports::SubscriptionState;
    use std::sync::Arc;
    use std::time::Duration;

    fn tally(first: u64, second: u64) -> Tally {
        let ids = [OptionId::new("1"), OptionId::new("2")];
        let mut tally = Tally::zeroed(&ids);
        for _ in 0..first {
            tally.increment(&ids[0]);
        }
        for _ in 0..second {
            tally.increment(&ids[1]);
        }
        tally
    }

    #[tokio::test]
    async fn subscribe_creates_room_if_not_exists() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_id = SessionId::new();

        let _sub = broadcaster.subscribe(&session_id).await;

        assert_eq!(broadcaster.active_sessions().await, vec![session_id]);
        assert_eq!(broadcaster.subscriber_count(&session_id).await, 1);
    }

    #[tokio::test]
    async fn publish_reaches_every_subscriber_in_room() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_id = SessionId::new();

        let mut sub1 = broadcaster.subscribe(&session_id).await;
        let mut sub2 = broadcaster.subscribe(&session_id).await;
        let mut sub3 = broadcaster.subscribe(&session_id).await;

        let delivered = broadcaster.publish(&session_id, &tally(1, 0)).await;

        assert_eq!(delivered, 3);
        assert_eq!(sub1.next_tally().await, Some(tally(1, 0)));
        assert_eq!(sub2.next_tally().await, Some(tally(1, 0)));
        assert_eq!(sub3.next_tally().await, Some(tally(1, 0)));
    }

    #[tokio::test]
    async fn publish_is_scoped_to_its_session() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_1 = SessionId::new();
        let session_2 = SessionId::new();

        let mut sub1 = broadcaster.subscribe(&session_1).await;
        let mut sub2 = broadcaster.subscribe(&session_2).await;

        broadcaster.publish(&session_1, &tally(1, 0)).await;

        assert_eq!(sub1.next_tally().await, Some(tally(1, 0)));
        let nothing = tokio::time::timeout(Duration::from_millis(50), sub2.next_tally()).await;
        assert!(nothing.is_err());
    }

    #[tokio::test]
    async fn publish_to_session_without_subscribers_is_noop() {
        let broadcaster = TallyBroadcaster::with_default_capacity();

        let delivered = broadcaster.publish(&SessionId::new(), &tally(1, 0)).await;

        assert_eq!(delivered, 0);
        assert!(broadcaster.active_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn unsubscribed_subscriber_receives_nothing_more() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_id = SessionId::new();
        let mut sub = broadcaster.subscribe(&session_id).await;

        broadcaster.publish(&session_id, &tally(1, 0)).await;
        broadcaster.unsubscribe(&mut sub).await;
        let delivered = broadcaster.publish(&session_id, &tally(2, 0)).await;

        assert_eq!(delivered, 0);
        assert_eq!(sub.state(), SubscriptionState::Closed);
        assert!(sub.next_tally().await.is_none());
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent_and_cleans_up_room() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_id = SessionId::new();
        let mut sub = broadcaster.subscribe(&session_id).await;

        broadcaster.unsubscribe(&mut sub).await;
        broadcaster.unsubscribe(&mut sub).await;

        assert_eq!(broadcaster.subscriber_count(&session_id).await, 0);
        assert!(broadcaster.active_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned_on_next_publish() {
        let broadcaster = TallyBroadcaster::with_default_capacity();
        let session_id = SessionId::new();
        let keep = broadcaster.subscribe(&session_id).await;
        let gone = broadcaster.subscribe(&session_id).await;
        drop(gone);

        let delivered = broadcaster.publish(&session_id, &tally(1, 0)).await;

        assert_eq!(delivered, 1);
        assert_eq!(broadcaster.subscriber_count(&session_id).await, 1);
        drop(keep);
    }

    #[tokio::test]
    async fn slow_subscriber_is_closed_when_queue_is_full() {
        let broadcaster = TallyBroadcaster::new(1);
        let session_id = SessionId::new();
        let mut slow = broadcaster.subscribe(&session_id).await;

        assert_eq!(broadcaster.publish(&session_id, &tally(1, 0)).await, 1);
        assert_eq!(broadcaster.publish(&session_id, &tally(2, 0)).await, 0);

        assert_eq!(broadcaster.subscriber_count(&session_id).await, 0);
        // The snapshot queued before the overflow is still delivered, then the stream ends.
        assert_eq!(slow.next_tally().await, Some(tally(1, 0)));
        assert!(slow.next_tally().await.is_none());
    }

    #[tokio::test]
    async fn total_subscriber_count_spans_rooms() {
        let broadcaster = Arc::new(TallyBroadcaster::with_default_capacity());
        let _a = broadcaster.subscribe(&SessionId::new()).await;
        let _b = broadcaster.subscribe(&SessionId::new()).await;
        let session = SessionId::new();
        let _c = broadcaster.subscribe(&session).await;
        let _d = broadcaster.subscribe(&session).await;

        assert_eq!(broadcaster.total_subscriber_count().await, 4);
        assert_eq!(broadcaster.active_sessions().await.len(), 3);
    }
}
