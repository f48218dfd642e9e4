//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and its collaborators. Adapters implement these ports.
//!
//! ## Storage
//!
//! - `SessionStore` - Registry of all sessions and their tallies
//!
//! ## Live results
//!
//! - `TallyPublisher` - Port for pushing tally snapshots after a vote
//! - `TallySubscriber` - Port for opening and closing live subscriptions
//! - `ResultBroadcaster` - Both of the above

mod session_store;
mod tally_publisher;
mod tally_subscriber;

pub use session_store::SessionStore;
pub use tally_publisher::TallyPublisher;
pub use tally_subscriber::{
    ResultBroadcaster, Subscription, SubscriptionId, SubscriptionState, TallySubscriber,
};
