//! Append-only trade ledger

use types::trade::Trade;

/// Time-ordered record of every executed trade
///
/// Strictly append-only: a trade is recorded exactly once per fill
/// event and never mutated or deleted. `all` returns execution order,
/// the only order that matters since trade ids are fresh per insertion.
#[derive(Debug, Default)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trade; O(1)
    pub fn record(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// All trades in execution order
    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
