//! Order book infrastructure module
//!
//! Contains price levels, bid book, and ask book implementations.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::{FrontFill, PriceLevel};
