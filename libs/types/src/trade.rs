//! Trade execution record

use crate::ids::{MarketId, OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One executed fill between a buy order and a sell order
///
/// Immutable once created. `sequence` is the global monotonic issuance
/// counter; it, not the wall-clock timestamp, is the authoritative
/// execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub sequence: u64,
    pub pair: MarketId,

    // Order references
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,

    // Execution details: price is always the passive (resting) order's price
    pub price: Price,
    pub quantity: Quantity,

    // Unix nanos
    pub executed_at: i64,
}

impl Trade {
    pub fn new(
        sequence: u64,
        pair: MarketId,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            sequence,
            pair,
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            executed_at,
        }
    }

    /// Trade value (price × quantity)
    pub fn trade_value(&self) -> Decimal {
        self.quantity.as_decimal() * self.price.as_decimal()
    }
}
