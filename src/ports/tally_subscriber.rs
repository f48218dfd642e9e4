//! TallySubscriber port - Interface for receiving live tally updates.
//!
//! A subscription is a handle over a per-subscriber queue. It implements
//! [`futures::Stream`], yielding one full tally snapshot per vote on its
//! session, and follows a two-state lifecycle:
//!
//! ```text
//! Open ──(unsubscribe / close / publisher drops it)──► Closed
//! ```
//!
//! Once closed, the stream ends and never restarts. Snapshots still sitting
//! in the queue at close time are discarded.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::domain::session::Tally;

/// Unique identifier for a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionState {
    Open,
    Closed,
}

/// Live feed of tally snapshots for one session.
///
/// Snapshots whose vote total is not above the last one yielded are skipped,
/// so a consumer never sees the tally move backwards even when concurrent
/// votes publish out of order.
pub struct Subscription {
    id: SubscriptionId,
    session_id: SessionId,
    receiver: mpsc::Receiver<Tally>,
    state: SubscriptionState,
    last_total: Option<u64>,
}

impl Subscription {
    /// Wrap the receiving half of a subscriber queue.
    pub fn new(id: SubscriptionId, session_id: SessionId, receiver: mpsc::Receiver<Tally>) -> Self {
        Self {
            id,
            session_id,
            receiver,
            state: SubscriptionState::Open,
            last_total: None,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SubscriptionState::Open
    }

    /// Mark `tally` as already seen by the consumer.
    ///
    /// Used when an initial snapshot was delivered out of band, so queued
    /// snapshots that are not newer than it get skipped.
    pub fn seed(&mut self, tally: &Tally) {
        let total = tally.total();
        if self.last_total.map_or(true, |last| total > last) {
            self.last_total = Some(total);
        }
    }

    /// Transition to `Closed`. Idempotent.
    pub fn close(&mut self) {
        if self.state == SubscriptionState::Open {
            self.state = SubscriptionState::Closed;
            self.receiver.close();
        }
    }

    /// Wait for the next snapshot; `None` once closed.
    pub async fn next_tally(&mut self) -> Option<Tally> {
        futures::StreamExt::next(self).await
    }

    fn is_stale(&self, tally: &Tally) -> bool {
        matches!(self.last_total, Some(last) if tally.total() <= last)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("last_total", &self.last_total)
            .finish()
    }
}

impl Stream for Subscription {
    type Item = Tally;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Tally>> {
        let this = self.get_mut();
        loop {
            if this.state == SubscriptionState::Closed {
                return Poll::Ready(None);
            }
            match this.receiver.poll_recv(cx) {
                Poll::Ready(Some(tally)) => {
                    if this.is_stale(&tally) {
                        continue;
                    }
                    this.last_total = Some(tally.total());
                    return Poll::Ready(Some(tally));
                }
                Poll::Ready(None) => {
                    this.state = SubscriptionState::Closed;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Port for subscribing to live tally updates.
#[async_trait]
pub trait TallySubscriber: Send + Sync {
    /// Open a subscription for a session.
    ///
    /// The current tally is not replayed; only snapshots published after
    /// registration are delivered.
    async fn subscribe(&self, session_id: &SessionId) -> Subscription;

    /// Close a subscription and release its slot. Idempotent.
    async fn unsubscribe(&self, subscription: &mut Subscription);

    /// Number of open subscriptions for a session.
    async fn subscriber_count(&self, session_id: &SessionId) -> usize;
}

/// Combined trait for broadcaster implementations.
///
/// A ResultBroadcaster both publishes tallies and hands out subscriptions.
pub trait ResultBroadcaster: super::TallyPublisher + TallySubscriber {}

// Blanket implementation - any type that implements both traits is a ResultBroadcaster
impl<T: super::TallyPublisher + TallySubscriber> ResultBroadcaster for T {}
