//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! A BTreeMap of price levels gives deterministic iteration; a side
//! index from order id to price makes cancels O(log n) without the
//! caller having to know the order's price.

use std::collections::{BTreeMap, HashMap};
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::{FrontFill, PriceLevel};

/// Bid (buy) side of the book
///
/// Orders are sorted by price descending, so the highest bid is best.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; best bid is the highest key
    levels: BTreeMap<Price, PriceLevel>,
    /// Resting order id -> its level's price
    index: HashMap<OrderId, Price>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the id is currently resting on this side
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.index.contains_key(order_id)
    }

    /// Insert an order at the tail of its price level's queue
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.limit_price).or_default();
        level.insert(order.order_id.clone(), order.account_id.clone(), order.amount);
        self.index.insert(order.order_id.clone(), order.limit_price);
    }

    /// Remove an order by id; true if it was resting here
    ///
    /// Empty price levels are pruned immediately.
    pub fn remove(&mut self, order_id: &OrderId) -> bool {
        let Some(price) = self.index.remove(order_id) else {
            return false;
        };
        if let Some(level) = self.levels.get_mut(&price) {
            let _ = level.remove(order_id);
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
        true
    }

    /// Get the best bid price (highest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Peek the order at the head of the best level's queue
    pub fn peek_best(&self) -> Option<(Price, &OrderId, Quantity)> {
        let (price, level) = self.levels.iter().next_back()?;
        let (order_id, _, remaining) = level.peek_front()?;
        Some((*price, order_id, remaining))
    }

    /// Fill the head of the best level by `fill_quantity`
    ///
    /// Reduces the passive order in place or extracts it when fully
    /// consumed, keeping the id index and level pruning consistent in
    /// the same mutation.
    pub fn fill_best(&mut self, fill_quantity: Quantity) -> Option<FrontFill> {
        let (price, level) = self.levels.iter_mut().next_back()?;
        let price = *price;
        let fill = level.fill_front(fill_quantity)?;

        if fill.fully_consumed {
            self.index.remove(&fill.order_id);
        }
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(fill)
    }

    /// Read-only view of all resting bids, best-first
    pub fn snapshot(&self, pair: &MarketId) -> Vec<Order> {
        self.levels
            .iter()
            .rev()
            .flat_map(|(price, level)| {
                level.entries().map(move |(order_id, account_id, remaining)| {
                    Order::new(
                        order_id.clone(),
                        account_id.clone(),
                        pair.clone(),
                        Side::Buy,
                        remaining,
                        *price,
                    )
                })
            })
            .collect()
    }

    /// Aggregated top-N price levels, best-first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of resting orders
    pub fn order_count(&self) -> usize {
        self.index.len()
    }
}
