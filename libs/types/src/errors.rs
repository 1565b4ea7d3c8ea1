//! Error types for the matching engine
//!
//! The core is pure in-memory computation, so everything here is input
//! validation: an error means the intent never reached the book.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Invalid market: {symbol}")]
    InvalidMarket { symbol: String },
}

/// Order-specific validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Missing field for CREATE: {field}")]
    MissingField { field: &'static str },

    #[error("Duplicate order id: {order_id}")]
    DuplicateOrderId { order_id: String },
}
