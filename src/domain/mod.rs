//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, error codes)
//! - `session` - Poll session aggregate, tally, and session errors

pub mod foundation;
pub mod session;
