//! Matching Engine
//!
//! Single-instrument limit order matching core with price-time priority.
//! Consumes an ordered sequence of order intents (CREATE/DELETE) and
//! produces the resulting trades and residual book state.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced (best price, then FIFO)
//! - Execution price is always the resting order's price
//! - Deterministic: outcomes are a pure function of intent order
//! - No resting order ever has zero or negative quantity

pub mod book;
pub mod engine;
pub mod intent;
pub mod ledger;
pub mod matching;

pub use engine::{DepthSnapshot, MatchingEngine, OrderBookSnapshot, SubmitResult};
pub use intent::{OrderIntent, TypeOp};
pub use ledger::TradeLedger;
