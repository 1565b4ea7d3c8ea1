//! Crossing detection logic
//!
//! Determines when an aggressor can execute against the opposing best
//! price. Because each side is price-ordered, the first non-crossing
//! best price ends the match loop: no worse price can cross either.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order crosses a resting order
///
/// A BUY aggressor crosses an ask priced at or below its limit; a SELL
/// aggressor crosses a bid priced at or above its limit.
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}
