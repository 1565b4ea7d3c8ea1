//! Trade execution logic
//!
//! Builds immutable trade records for each fill event and owns the
//! monotonic trade sequence.

use chrono::Utc;
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

/// Match executor for handling trade generation
///
/// Orders from the same account match like any others; no self-trade
/// screen is applied, so the trade output is a function of prices and
/// arrival order alone.
#[derive(Debug)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Execute a fill between the aggressor and the passive order
    ///
    /// `price` must be the passive (resting) order's price; the buy and
    /// sell order ids are assigned from the aggressor's side.
    pub fn execute_trade(
        &mut self,
        pair: MarketId,
        aggressor_side: Side,
        aggressor_order_id: &OrderId,
        passive_order_id: &OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Trade {
        let (buy_order_id, sell_order_id) = match aggressor_side {
            Side::Buy => (aggressor_order_id.clone(), passive_order_id.clone()),
            Side::Sell => (passive_order_id.clone(), aggressor_order_id.clone()),
        };

        let sequence = self.next_sequence();

        Trade::new(
            sequence,
            pair,
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            now_nanos(),
        )
    }
}

/// Current wall clock as Unix nanos; saturates far past any real date
fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
