//! Session domain module.
//!
//! A session is one poll: title, optional description, a fixed option set
//! and the vote tally. Sessions are created once and never deleted.

mod aggregate;
mod errors;
mod tally;

pub use aggregate::{PollOption, Session, SessionSummary, MAX_TITLE_LENGTH, MIN_OPTIONS};
pub use errors::SessionError;
pub use tally::Tally;
