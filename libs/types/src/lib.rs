//! Types library for the matching engine
//!
//! This library provides the core type definitions shared across the
//! engine, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId, AccountId, MarketId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Resting order record and side
//! - `trade`: Trade execution record
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
}
