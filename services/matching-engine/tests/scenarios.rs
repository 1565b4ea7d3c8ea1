//! End-to-end scenario tests for the matching core
//!
//! Drives the engine through ordered intent sequences (the same shape
//! the JSON wire records carry) and checks trades and residual book
//! state, plus property-based checks of the matching invariants.

use matching_engine::{MatchingEngine, OrderIntent, SubmitResult};
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;

fn create(id: &str, side: Side, price: &str, qty: &str) -> OrderIntent {
    OrderIntent::create(
        id,
        "acc1",
        "BTC/USD",
        side,
        qty.parse::<Decimal>().unwrap(),
        price.parse::<Decimal>().unwrap(),
    )
}

fn create_for(id: &str, account: &str, side: Side, price: &str, qty: &str) -> OrderIntent {
    OrderIntent::create(
        id,
        account,
        "BTC/USD",
        side,
        qty.parse::<Decimal>().unwrap(),
        price.parse::<Decimal>().unwrap(),
    )
}

fn engine() -> MatchingEngine {
    MatchingEngine::new("BTC/USD")
}

// ── Concrete scenarios ──────────────────────────────────────────────

#[test]
fn sell_then_smaller_buy_leaves_sell_residual() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Sell, "100", "10"),
            create("2", Side::Buy, "100", "5"),
        ])
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price::from_u64(100));
    assert_eq!(trades[0].quantity, Quantity::from_u64(5));

    let book = engine.order_book();
    assert!(book.buy.is_empty());
    assert_eq!(book.sell.len(), 1);
    assert_eq!(book.sell[0].amount, Quantity::from_u64(5));
}

#[test]
fn buy_then_smaller_sell_leaves_buy_residual() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Buy, "40000", "10"),
            create("2", Side::Sell, "40000", "4"),
        ])
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity, Quantity::from_u64(4));
    assert_eq!(trades[0].price, Price::from_u64(40000));
    assert_eq!(trades[0].buy_order_id, OrderId::new("1"));
    assert_eq!(trades[0].sell_order_id, OrderId::new("2"));

    let book = engine.order_book();
    assert_eq!(book.buy.len(), 1);
    assert_eq!(book.buy[0].amount, Quantity::from_u64(6));
    assert!(book.sell.is_empty());
}

#[test]
fn non_crossing_orders_both_rest() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Buy, "39000", "5"),
            create("2", Side::Sell, "40000", "5"),
        ])
        .unwrap();

    assert!(trades.is_empty());
    let book = engine.order_book();
    assert_eq!(book.buy.len(), 1);
    assert_eq!(book.sell.len(), 1);
}

#[test]
fn aggressive_sell_executes_at_resting_bid_price() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Buy, "41000", "5"),
            create("2", Side::Sell, "40000", "5"),
        ])
        .unwrap();

    assert_eq!(trades.len(), 1);
    // Passive price governs: price improvement goes to the aggressor
    assert_eq!(trades[0].price, Price::from_u64(41000));
    assert_eq!(trades[0].quantity, Quantity::from_u64(5));

    let book = engine.order_book();
    assert!(book.buy.is_empty());
    assert!(book.sell.is_empty());
}

#[test]
fn create_then_delete_empties_book() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Buy, "40000", "10"),
            OrderIntent::delete("1"),
        ])
        .unwrap();

    assert!(trades.is_empty());
    let book = engine.order_book();
    assert!(book.buy.is_empty());
    assert!(book.sell.is_empty());
}

// ── Priority and idempotence ────────────────────────────────────────

#[test]
fn price_time_priority_within_level() {
    let mut engine = engine();
    engine
        .process(vec![
            create_for("early", "acc1", Side::Sell, "40000", "3"),
            create_for("late", "acc2", Side::Sell, "40000", "3"),
        ])
        .unwrap();

    let trades = engine
        .process(vec![create_for("taker", "acc3", Side::Buy, "40000", "4")])
        .unwrap();

    // First arrival fills first and in full before the second is touched
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].sell_order_id, OrderId::new("early"));
    assert_eq!(trades[0].quantity, Quantity::from_u64(3));
    assert_eq!(trades[1].sell_order_id, OrderId::new("late"));
    assert_eq!(trades[1].quantity, Quantity::from_u64(1));
}

#[test]
fn better_price_beats_earlier_arrival() {
    let mut engine = engine();
    engine
        .process(vec![
            create("early-high", Side::Sell, "40100", "1"),
            create("late-low", Side::Sell, "40000", "1"),
        ])
        .unwrap();

    let trades = engine
        .process(vec![create("taker", Side::Buy, "40100", "1")])
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].sell_order_id, OrderId::new("late-low"));
    assert_eq!(trades[0].price, Price::from_u64(40000));
}

#[test]
fn cancel_is_idempotent() {
    let mut once = engine();
    once.process(vec![
        create("1", Side::Buy, "40000", "10"),
        OrderIntent::delete("1"),
    ])
    .unwrap();

    let mut twice = engine();
    let results: Vec<SubmitResult> = vec![
        twice.apply(create("1", Side::Buy, "40000", "10")).unwrap(),
        twice.apply(OrderIntent::delete("1")).unwrap(),
        twice.apply(OrderIntent::delete("1")).unwrap(),
    ];

    assert_eq!(results[1], SubmitResult::Canceled { existed: true });
    assert_eq!(results[2], SubmitResult::Canceled { existed: false });

    let a = once.order_book();
    let b = twice.order_book();
    assert_eq!(a.buy, b.buy);
    assert_eq!(a.sell, b.sell);
}

#[test]
fn delete_finds_order_without_side_hint() {
    let mut engine = engine();
    engine.apply(create("s1", Side::Sell, "40000", "2")).unwrap();

    // Bare DELETE record, no side, no price
    let result = engine.apply(OrderIntent::delete("s1")).unwrap();
    assert_eq!(result, SubmitResult::Canceled { existed: true });
    assert!(engine.order_book().sell.is_empty());
}

#[test]
fn cancel_of_partially_filled_residual() {
    let mut engine = engine();
    engine
        .process(vec![
            create("maker", Side::Sell, "40000", "10"),
            create("taker", Side::Buy, "40000", "4"),
        ])
        .unwrap();

    // 6 remain resting under the original id; cancel takes them out
    let result = engine.apply(OrderIntent::delete("maker")).unwrap();
    assert_eq!(result, SubmitResult::Canceled { existed: true });
    assert!(engine.order_book().sell.is_empty());
    assert_eq!(engine.trades().len(), 1);
}

// ── Decimal quantities ──────────────────────────────────────────────

#[test]
fn fractional_amounts_match_exactly() {
    let mut engine = engine();
    let trades = engine
        .process(vec![
            create("1", Side::Sell, "41200.50", "0.3"),
            create("2", Side::Buy, "41200.50", "0.1"),
            create("3", Side::Buy, "41200.50", "0.2"),
        ])
        .unwrap();

    assert_eq!(trades.len(), 2);
    // 0.3 - 0.1 - 0.2 is exactly zero in decimal; nothing rests
    let book = engine.order_book();
    assert!(book.sell.is_empty());
    assert!(book.buy.is_empty());
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[test]
fn json_batch_to_outputs() {
    let input = r#"[
        { "type_op": "CREATE", "order_id": "1", "account_id": "acc1",
          "pair": "BTC/USD", "side": "SELL", "amount": "10", "limit_price": "100" },
        { "type_op": "CREATE", "order_id": "2", "account_id": "acc2",
          "pair": "BTC/USD", "side": "BUY", "amount": "5", "limit_price": "100" },
        { "type_op": "DELETE", "order_id": "missing" }
    ]"#;

    let intents: Vec<OrderIntent> = serde_json::from_str(input).unwrap();
    let mut engine = engine();
    let trades = engine.process(intents).unwrap();
    assert_eq!(trades.len(), 1);

    let book_json = serde_json::to_value(engine.order_book()).unwrap();
    assert!(book_json["buy"].as_array().unwrap().is_empty());
    let sells = book_json["sell"].as_array().unwrap();
    assert_eq!(sells.len(), 1);
    assert_eq!(sells[0]["amount"], "5");
    assert_eq!(sells[0]["limit_price"], "100");

    let trades_json = serde_json::to_value(engine.trades()).unwrap();
    let first = &trades_json.as_array().unwrap()[0];
    assert_eq!(first["buy_order_id"], "2");
    assert_eq!(first["sell_order_id"], "1");
    assert!(first["trade_id"].is_string());
}

// ── Properties ──────────────────────────────────────────────────────

fn arb_intents() -> impl Strategy<Value = Vec<(bool, u8, u8, u8)>> {
    // (is_buy, price band, quantity, cancel target); small domains so
    // crossing and duplicate-price cases come up constantly
    prop::collection::vec((any::<bool>(), 1u8..20, 1u8..10, any::<u8>()), 1..60)
}

proptest! {
    #[test]
    fn no_zero_residue_and_conservation(ops in arb_intents()) {
        let mut engine = MatchingEngine::new("BTC/USD");
        let mut submitted: Vec<(String, Decimal)> = Vec::new();

        for (i, (is_buy, price, qty, cancel)) in ops.iter().enumerate() {
            let id = format!("o{i}");
            if *cancel % 5 == 0 && !submitted.is_empty() {
                let target = &submitted[*cancel as usize % submitted.len()].0;
                engine.apply(OrderIntent::delete(target.as_str())).unwrap();
            } else {
                let side = if *is_buy { Side::Buy } else { Side::Sell };
                let amount = Decimal::from(*qty);
                engine.apply(OrderIntent::create(
                    id.as_str(),
                    "acc1",
                    "BTC/USD",
                    side,
                    amount,
                    Decimal::from(*price as u64 * 100),
                )).unwrap();
                submitted.push((id, amount));
            }
        }

        // Every resting order has strictly positive quantity
        let book = engine.order_book();
        for order in book.buy.iter().chain(book.sell.iter()) {
            prop_assert!(!order.amount.is_zero());
        }

        // Trade quantities are positive; per-order fills never exceed
        // the submitted amount
        let mut filled: std::collections::HashMap<&str, Decimal> =
            std::collections::HashMap::new();
        for trade in engine.trades() {
            prop_assert!(!trade.quantity.is_zero());
            *filled.entry(trade.buy_order_id.as_str()).or_default() +=
                trade.quantity.as_decimal();
            *filled.entry(trade.sell_order_id.as_str()).or_default() +=
                trade.quantity.as_decimal();
        }
        for (id, amount) in &submitted {
            if let Some(total) = filled.get(id.as_str()) {
                prop_assert!(total <= amount, "order {} overfilled: {} > {}", id, total, amount);
            }
        }
    }

    #[test]
    fn trades_respect_both_limits(ops in arb_intents()) {
        let mut engine = MatchingEngine::new("BTC/USD");
        let mut limits: std::collections::HashMap<String, Decimal> =
            std::collections::HashMap::new();

        for (i, (is_buy, price, qty, _)) in ops.iter().enumerate() {
            let id = format!("o{i}");
            let side = if *is_buy { Side::Buy } else { Side::Sell };
            let limit = Decimal::from(*price as u64 * 100);
            limits.insert(id.clone(), limit);
            engine.apply(OrderIntent::create(
                id.as_str(),
                "acc1",
                "BTC/USD",
                side,
                Decimal::from(*qty),
                limit,
            )).unwrap();
        }

        for trade in engine.trades() {
            let price = trade.price.as_decimal();
            let buy_limit = limits[trade.buy_order_id.as_str()];
            let sell_limit = limits[trade.sell_order_id.as_str()];
            prop_assert!(price <= buy_limit, "buy limit violated");
            prop_assert!(price >= sell_limit, "sell limit violated");
        }
    }

    #[test]
    fn sequences_strictly_increase(ops in arb_intents()) {
        let mut engine = MatchingEngine::new("BTC/USD");
        for (i, (is_buy, price, qty, _)) in ops.iter().enumerate() {
            let side = if *is_buy { Side::Buy } else { Side::Sell };
            engine.apply(OrderIntent::create(
                format!("o{i}").as_str(),
                "acc1",
                "BTC/USD",
                side,
                Decimal::from(*qty),
                Decimal::from(*price as u64 * 100),
            )).unwrap();
        }

        let sequences: Vec<u64> = engine.trades().iter().map(|t| t.sequence).collect();
        for pair in sequences.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}
