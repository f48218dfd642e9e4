//! TallyPublisher port - Interface for pushing tally updates.
//!
//! The vote path publishes through this port without knowing how (or whether)
//! subscribers are connected.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::Tally;

/// Port for publishing tally snapshots.
///
/// Implementations must:
/// - Deliver to every open subscriber of the session, and no one else
/// - Return without waiting for subscribers to consume the snapshot
/// - Close (not retry) subscribers that cannot accept the snapshot
#[async_trait]
pub trait TallyPublisher: Send + Sync {
    /// Publish a full tally snapshot for a session.
    ///
    /// Returns the number of subscribers the snapshot was queued for.
    async fn publish(&self, session_id: &SessionId, tally: &Tally) -> usize;
}
