//! Live Poll - real-time polling service
//!
//! Users create voting sessions with a title and a set of options, others
//! cast votes, and every viewer receives tally updates as they happen.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
