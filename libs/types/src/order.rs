//! Resting order record and side

use crate::ids::{AccountId, MarketId, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// A limit order as it rests in (or enters) the book
///
/// `amount` is the current remaining quantity: it decreases on partial
/// fills and stays strictly positive for as long as the order rests.
/// A fully filled order is removed from the book, never left at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub pair: MarketId,
    pub side: Side,
    pub amount: Quantity,
    pub limit_price: Price,
}

impl Order {
    pub fn new(
        order_id: OrderId,
        account_id: AccountId,
        pair: MarketId,
        side: Side,
        amount: Quantity,
        limit_price: Price,
    ) -> Self {
        Self {
            order_id,
            account_id,
            pair,
            side,
            amount,
            limit_price,
        }
    }

    /// Copy of this order with the amount replaced by a fill residual
    pub fn with_amount(&self, amount: Quantity) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}
