//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `storage` - Session store implementations (in-memory)
//! - `broadcast` - Live tally fan-out to subscribers
//! - `http` - REST endpoints and the SSE result stream

pub mod broadcast;
pub mod http;
pub mod storage;

pub use broadcast::TallyBroadcaster;
pub use storage::InMemorySessionStore;
