//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error codes that form the
//! vocabulary of the polling domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ErrorCode;
pub use ids::{OptionId, SessionId};
pub use timestamp::Timestamp;
