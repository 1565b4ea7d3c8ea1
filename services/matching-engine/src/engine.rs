//! Matching engine core
//!
//! Main coordinator for order book and matching logic. One engine
//! instance serves one market; it is explicitly constructed and owned
//! by its caller, and processes one intent to completion before the
//! next (`&mut self` throughout, so concurrent mutation cannot
//! compile). Outcomes are a deterministic function of intent order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use types::errors::{EngineError, OrderError};
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook};
use crate::intent::{OrderIntent, TypeOp};
use crate::ledger::TradeLedger;
use crate::matching::{crossing, MatchExecutor};

/// Single-instrument matching engine
#[derive(Debug)]
pub struct MatchingEngine {
    symbol: MarketId,
    bids: BidBook,
    asks: AskBook,
    executor: MatchExecutor,
    ledger: TradeLedger,
}

/// Result of applying one intent
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// CREATE matched nothing and rests in full
    Resting,
    /// CREATE matched partially; the residual rests
    PartiallyFilled { trades: Vec<Trade>, remaining: Order },
    /// CREATE was completely filled
    Filled { trades: Vec<Trade> },
    /// DELETE; `existed` is false for unknown or already-settled ids
    Canceled { existed: bool },
}

/// Read-only order book snapshot, best-first per side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub buy: Vec<Order>,
    pub sell: Vec<Order>,
}

/// Aggregated per-level depth view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

impl MatchingEngine {
    /// Create a new engine for the given market
    pub fn new(symbol: impl Into<MarketId>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BidBook::new(),
            asks: AskBook::new(),
            executor: MatchExecutor::new(0),
            ledger: TradeLedger::new(),
        }
    }

    /// The market this engine serves
    pub fn symbol(&self) -> &MarketId {
        &self.symbol
    }

    /// Apply an ordered batch of intents
    ///
    /// Returns every trade the batch produced, in execution order.
    /// Fails fast on the first invalid intent; intents already applied
    /// stay applied.
    pub fn process(
        &mut self,
        intents: impl IntoIterator<Item = OrderIntent>,
    ) -> Result<Vec<Trade>, EngineError> {
        let mut trades = Vec::new();
        for intent in intents {
            match self.apply(intent)? {
                SubmitResult::Filled { trades: t }
                | SubmitResult::PartiallyFilled { trades: t, .. } => trades.extend(t),
                SubmitResult::Resting | SubmitResult::Canceled { .. } => {}
            }
        }
        Ok(trades)
    }

    /// Apply a single intent to completion
    pub fn apply(&mut self, intent: OrderIntent) -> Result<SubmitResult, EngineError> {
        match intent.type_op {
            TypeOp::Create => {
                let order = intent.into_order().map_err(|err| {
                    warn!(%err, "rejected CREATE intent");
                    err
                })?;
                self.admit(order)
            }
            TypeOp::Delete => Ok(self.cancel(&intent.order_id)),
        }
    }

    /// Current resting book, best-first per side
    pub fn order_book(&self) -> OrderBookSnapshot {
        OrderBookSnapshot {
            buy: self.bids.snapshot(&self.symbol),
            sell: self.asks.snapshot(&self.symbol),
        }
    }

    /// Aggregated top-N price levels per side
    pub fn depth(&self, depth: usize) -> DepthSnapshot {
        DepthSnapshot {
            bids: self.bids.depth_snapshot(depth),
            asks: self.asks.depth_snapshot(depth),
        }
    }

    /// Full trade history in execution order
    pub fn trades(&self) -> &[Trade] {
        self.ledger.all()
    }

    // -----------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------

    /// Admission checks, then the match loop
    fn admit(&mut self, order: Order) -> Result<SubmitResult, EngineError> {
        if order.pair != self.symbol {
            warn!(pair = %order.pair, "intent names a different market");
            return Err(EngineError::InvalidMarket {
                symbol: order.pair.to_string(),
            });
        }
        if self.bids.contains(&order.order_id) || self.asks.contains(&order.order_id) {
            warn!(order_id = %order.order_id, "duplicate id while resting");
            return Err(OrderError::DuplicateOrderId {
                order_id: order.order_id.to_string(),
            }
            .into());
        }
        Ok(self.submit(order))
    }

    /// Match the aggressor against the opposite side, rest any residual
    fn submit(&mut self, order: Order) -> SubmitResult {
        let (remaining, trades) = match order.side {
            Side::Buy => self.match_against_asks(&order),
            Side::Sell => self.match_against_bids(&order),
        };

        if remaining.is_zero() {
            debug!(order_id = %order.order_id, fills = trades.len(), "order fully filled");
            return SubmitResult::Filled { trades };
        }

        // Unfilled residual rests on its own side
        let resting = order.with_amount(remaining);
        match resting.side {
            Side::Buy => self.bids.insert(&resting),
            Side::Sell => self.asks.insert(&resting),
        }
        debug!(order_id = %resting.order_id, amount = %resting.amount, "order resting");

        if trades.is_empty() {
            SubmitResult::Resting
        } else {
            SubmitResult::PartiallyFilled {
                trades,
                remaining: resting,
            }
        }
    }

    /// Match an incoming buy order against asks (lowest price first)
    fn match_against_asks(&mut self, order: &Order) -> (Quantity, Vec<Trade>) {
        let mut remaining = order.amount;
        let mut trades = Vec::new();

        while !remaining.is_zero() {
            // Stop at the first non-crossing level; the side is
            // price-ordered, so nothing beyond it can cross either.
            let Some((ask_price, _, passive_remaining)) = self.asks.peek_best() else {
                break;
            };
            if !crossing::incoming_can_match(Side::Buy, order.limit_price, ask_price) {
                break;
            }

            let fill_qty = remaining.min(passive_remaining);
            let Some(fill) = self.asks.fill_best(fill_qty) else {
                break;
            };

            // Execution price is the passive order's price
            let trade = self.executor.execute_trade(
                self.symbol.clone(),
                Side::Buy,
                &order.order_id,
                &fill.order_id,
                ask_price,
                fill_qty,
            );
            debug!(
                buy = %trade.buy_order_id,
                sell = %trade.sell_order_id,
                price = %trade.price,
                quantity = %trade.quantity,
                "trade executed"
            );
            trades.push(trade.clone());
            self.ledger.record(trade);

            remaining = remaining.saturating_sub(fill_qty);
        }

        (remaining, trades)
    }

    /// Match an incoming sell order against bids (highest price first)
    fn match_against_bids(&mut self, order: &Order) -> (Quantity, Vec<Trade>) {
        let mut remaining = order.amount;
        let mut trades = Vec::new();

        while !remaining.is_zero() {
            let Some((bid_price, _, passive_remaining)) = self.bids.peek_best() else {
                break;
            };
            if !crossing::incoming_can_match(Side::Sell, order.limit_price, bid_price) {
                break;
            }

            let fill_qty = remaining.min(passive_remaining);
            let Some(fill) = self.bids.fill_best(fill_qty) else {
                break;
            };

            let trade = self.executor.execute_trade(
                self.symbol.clone(),
                Side::Sell,
                &order.order_id,
                &fill.order_id,
                bid_price,
                fill_qty,
            );
            debug!(
                buy = %trade.buy_order_id,
                sell = %trade.sell_order_id,
                price = %trade.price,
                quantity = %trade.quantity,
                "trade executed"
            );
            trades.push(trade.clone());
            self.ledger.record(trade);

            remaining = remaining.saturating_sub(fill_qty);
        }

        (remaining, trades)
    }

    /// Cancel by id, trying both sides
    ///
    /// DELETE intents do not carry reliable side information, so the
    /// id is looked up on both books. Unknown or already-settled ids
    /// are a silent no-op (idempotent cancel).
    fn cancel(&mut self, order_id: &OrderId) -> SubmitResult {
        let existed = self.bids.remove(order_id) || self.asks.remove(order_id);
        debug!(order_id = %order_id, existed, "cancel");
        SubmitResult::Canceled { existed }
    }
}
