//! Live result distribution.
//!
//! ```text
//! ┌──────────────────────┐      publish       ┌──────────────────────────┐
//! │  SubmitVoteHandler   │ ─────────────────► │     TallyBroadcaster     │
//! └──────────────────────┘                    │  room per session id     │
//!                                             └────────────┬─────────────┘
//!                                                          │ bounded queue per subscriber
//!                                                          ▼
//!                                             ┌──────────────────────────┐
//!                                             │ Subscription (Stream)    │
//!                                             │  → SSE response body     │
//!                                             └──────────────────────────┘
//! ```

pub mod rooms;

pub use rooms::{TallyBroadcaster, DEFAULT_SUBSCRIBER_CAPACITY};
