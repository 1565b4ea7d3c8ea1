//! Order-intent ingestion and admission validation
//!
//! The wire record is JSON-shaped with decimals as strings. A malformed
//! numeric field fails deserialization outright; it is never coerced to
//! zero, so no phantom zero-quantity order can enter the book.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::errors::OrderError;
use types::ids::{AccountId, MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Intent operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeOp {
    Create,
    Delete,
}

/// One element of the ordered input sequence
///
/// Only `type_op` and `order_id` are reliable on every intent: DELETE
/// records in the wild carry anything from the full original order to
/// just the id, so everything else is optional at the serde layer and
/// demanded by [`OrderIntent::into_order`] for CREATE.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntent {
    pub type_op: TypeOp,
    pub order_id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<MarketId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
}

impl OrderIntent {
    /// Build a CREATE intent
    pub fn create(
        order_id: impl Into<OrderId>,
        account_id: impl Into<AccountId>,
        pair: impl Into<MarketId>,
        side: Side,
        amount: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            type_op: TypeOp::Create,
            order_id: order_id.into(),
            account_id: Some(account_id.into()),
            pair: Some(pair.into()),
            side: Some(side),
            amount: Some(amount),
            limit_price: Some(limit_price),
        }
    }

    /// Build a DELETE intent (only the id is required)
    pub fn delete(order_id: impl Into<OrderId>) -> Self {
        Self {
            type_op: TypeOp::Delete,
            order_id: order_id.into(),
            account_id: None,
            pair: None,
            side: None,
            amount: None,
            limit_price: None,
        }
    }

    /// Validate a CREATE intent into an order fit for matching
    ///
    /// Rejects missing fields and non-positive magnitudes; the matching
    /// loop assumes strictly positive prices and quantities.
    pub fn into_order(self) -> Result<Order, OrderError> {
        let account_id = self
            .account_id
            .ok_or(OrderError::MissingField { field: "account_id" })?;
        let pair = self.pair.ok_or(OrderError::MissingField { field: "pair" })?;
        let side = self.side.ok_or(OrderError::MissingField { field: "side" })?;
        let amount = self
            .amount
            .ok_or(OrderError::MissingField { field: "amount" })?;
        let limit_price = self
            .limit_price
            .ok_or(OrderError::MissingField { field: "limit_price" })?;

        if amount <= Decimal::ZERO {
            return Err(OrderError::InvalidQuantity(amount.to_string()));
        }
        if limit_price <= Decimal::ZERO {
            return Err(OrderError::InvalidPrice(limit_price.to_string()));
        }

        let amount = Quantity::try_new(amount)
            .ok_or_else(|| OrderError::InvalidQuantity(amount.to_string()))?;
        let limit_price = Price::try_new(limit_price)
            .ok_or_else(|| OrderError::InvalidPrice(limit_price.to_string()))?;

        Ok(Order::new(
            self.order_id,
            account_id,
            pair,
            side,
            amount,
            limit_price,
        ))
    }
}
