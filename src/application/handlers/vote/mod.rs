//! Vote command handlers.

mod submit_vote;

pub use submit_vote::{SubmitVoteCommand, SubmitVoteHandler, SubmitVoteResult};
