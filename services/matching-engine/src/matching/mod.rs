//! Matching logic module
//!
//! Implements price-time priority matching algorithm

pub mod crossing;
pub mod executor;

pub use crossing::incoming_can_match;
pub use executor::MatchExecutor;
