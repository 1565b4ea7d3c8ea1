//! Price level implementation with FIFO queue
//!
//! A price level contains all orders resting at one exact price.
//! Orders are kept in arrival order (FIFO) to enforce time priority.
//! An entry with zero remaining quantity never survives a mutation.

use std::collections::VecDeque;
use types::ids::{AccountId, OrderId};
use types::numeric::Quantity;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    /// Queue of orders at this price level (arrival order)
    orders: VecDeque<OrderEntry>,
    /// Total quantity available at this level
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone)]
struct OrderEntry {
    order_id: OrderId,
    account_id: AccountId,
    remaining: Quantity,
}

/// Outcome of filling against the front of a level
#[derive(Debug, Clone, PartialEq)]
pub struct FrontFill {
    /// The passive order that was filled
    pub order_id: OrderId,
    pub account_id: AccountId,
    /// True when the fill consumed the order entirely and it was removed
    pub fully_consumed: bool,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn insert(&mut self, order_id: OrderId, account_id: AccountId, quantity: Quantity) {
        self.orders.push_back(OrderEntry {
            order_id,
            account_id,
            remaining: quantity,
        });
        self.total_quantity = self.total_quantity + quantity;
    }

    /// Remove an order from the queue by id
    ///
    /// Returns the remaining quantity of the removed order, or None if
    /// it is not resting at this level.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Quantity> {
        let position = self.orders.iter().position(|e| &e.order_id == order_id)?;
        let entry = self.orders.remove(position)?;

        self.total_quantity = self.total_quantity.saturating_sub(entry.remaining);
        Some(entry.remaining)
    }

    /// Peek at the front order without removing it
    pub fn peek_front(&self) -> Option<(&OrderId, &AccountId, Quantity)> {
        self.orders
            .front()
            .map(|e| (&e.order_id, &e.account_id, e.remaining))
    }

    /// Fill the front order by `fill_quantity`
    ///
    /// Decrements the head entry; when nothing remains the entry is
    /// popped. The caller must not pass more than the head's remaining
    /// quantity (the min() rule in the match loop guarantees this).
    pub fn fill_front(&mut self, fill_quantity: Quantity) -> Option<FrontFill> {
        let front = self.orders.front_mut()?;
        let new_remaining = front.remaining.saturating_sub(fill_quantity);

        self.total_quantity = self.total_quantity.saturating_sub(fill_quantity);

        if new_remaining.is_zero() {
            let entry = self.orders.pop_front()?;
            Some(FrontFill {
                order_id: entry.order_id,
                account_id: entry.account_id,
                fully_consumed: true,
            })
        } else {
            front.remaining = new_remaining;
            Some(FrontFill {
                order_id: front.order_id.clone(),
                account_id: front.account_id.clone(),
                fully_consumed: false,
            })
        }
    }

    /// Iterate entries in arrival order
    pub fn entries(&self) -> impl Iterator<Item = (&OrderId, &AccountId, Quantity)> {
        self.orders
            .iter()
            .map(|e| (&e.order_id, &e.account_id, e.remaining))
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
