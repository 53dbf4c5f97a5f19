use rust_decimal::Decimal;
use sandwich_sim::{compute_profit, PairId, Price, ProfitReport, Size, Token, Transaction, TxSide};

fn organic(side: TxSide, amount: &str, position: usize) -> Transaction {
    Transaction::organic(
        Token::Eth,
        side,
        Size::from_str(amount).unwrap(),
        Price::from_str("3200").unwrap(),
        position,
    )
    .unwrap()
}

fn own(
    side: TxSide,
    symbol: Token,
    amount: &str,
    price: &str,
    label: &str,
    pair: Option<&str>,
) -> Transaction {
    Transaction::sequencer(
        symbol,
        side,
        Size::from_str(amount).unwrap(),
        Price::from_str(price).unwrap(),
        label,
        pair.map(PairId::from),
    )
    .unwrap()
}

#[test]
fn test_empty_queue_report() {
    let report = compute_profit(&[]);
    assert_eq!(report.gross_profit, Decimal::ZERO);
    assert_eq!(report.net_profit, Decimal::ZERO);
    assert_eq!(report.sequencer_tx_count, 0);
    assert_eq!(report.sandwich_pairs, 0);
    assert!(report.profit_breakdown.is_empty());
}

#[test]
fn test_organic_only_queue_has_no_profit() {
    let queue = vec![organic(TxSide::Buy, "1", 1), organic(TxSide::Sell, "2", 2)];
    assert_eq!(compute_profit(&queue), ProfitReport::empty());
}

#[test]
fn test_paired_profit_exactness() {
    let queue = vec![
        own(TxSide::Buy, Token::Eth, "2", "99", "SandwichBuy1", Some("p1")),
        organic(TxSide::Buy, "2", 1),
        own(TxSide::Sell, Token::Eth, "2", "102", "SandwichSell2", Some("p1")),
    ];
    let report = compute_profit(&queue);
    assert_eq!(report.gross_profit, Decimal::new(600, 2));
    assert_eq!(
        report.profit_breakdown[0].amount,
        Some(Size::from_str("2").unwrap())
    );
    assert_eq!(
        report.profit_breakdown[0].sell_price,
        Some(Price::from_str("102").unwrap())
    );
}

#[test]
fn test_mismatched_symbol_pair_ignored() {
    let queue = vec![
        own(TxSide::Buy, Token::Eth, "2", "99", "B", Some("p1")),
        own(TxSide::Sell, Token::Sol, "2", "102", "S", Some("p1")),
    ];
    let report = compute_profit(&queue);
    assert_eq!(report.sandwich_pairs, 1);
    assert!(report.profit_breakdown.is_empty());
}

#[test]
fn test_front_run_exactness() {
    let gain = vec![
        own(TxSide::Buy, Token::Eth, "3", "3200", "BUY1", None),
        organic(TxSide::Buy, "1", 1),
    ];
    assert_eq!(compute_profit(&gain).gross_profit, Decimal::new(600, 2));

    let loss = vec![
        own(TxSide::Buy, Token::Eth, "3", "3200", "BUY1", None),
        organic(TxSide::Sell, "1", 1),
    ];
    assert_eq!(compute_profit(&loss).gross_profit, Decimal::new(-600, 2));
}

#[test]
fn test_successor_uses_final_position_not_insertion_order() {
    // BUY2 executes ahead of another sequencer tx, so only SELL1 is attributed
    let queue = vec![
        own(TxSide::Buy, Token::Eth, "1", "3200", "BUY2", None),
        own(TxSide::Sell, Token::Eth, "1", "3200", "SELL1", None),
        organic(TxSide::Sell, "1", 1),
    ];
    let report = compute_profit(&queue);

    assert_eq!(report.profit_breakdown.len(), 1);
    assert_eq!(report.profit_breakdown[0].label, "SELL1");
    assert_eq!(report.gross_profit, Decimal::new(2, 0));
}

#[test]
fn test_multiple_pairs_keep_first_seen_order() {
    let queue = vec![
        own(TxSide::Buy, Token::Sol, "10", "84", "SandwichBuy3", Some("b")),
        own(TxSide::Buy, Token::Eth, "1", "3199", "SandwichBuy1", Some("a")),
        organic(TxSide::Buy, "1", 1),
        own(TxSide::Sell, Token::Eth, "1", "3202", "SandwichSell2", Some("a")),
        own(TxSide::Sell, Token::Sol, "10", "87", "SandwichSell4", Some("b")),
    ];
    let report = compute_profit(&queue);

    assert_eq!(report.sandwich_pairs, 2);
    assert_eq!(
        report.profit_breakdown[0].label,
        "SandwichBuy3 → SandwichSell4"
    );
    assert_eq!(
        report.profit_breakdown[1].label,
        "SandwichBuy1 → SandwichSell2"
    );
    assert_eq!(report.gross_profit, Decimal::new(33, 0));
}

#[test]
fn test_report_json_fields() {
    let queue = vec![
        own(TxSide::Sell, Token::Eth, "1", "3200", "SELL1", None),
        organic(TxSide::Sell, "1", 1),
    ];
    let json = compute_profit(&queue).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["sequencer_tx_count"], 1);
    assert_eq!(value["profit_breakdown"][0]["label"], "SELL1");
    assert_eq!(value["profit_breakdown"][0]["kind"], "FrontRun");
}

mod zero_fee_sessions {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use sandwich_sim::{ManualOrder, SimulationConfig, SimulationState, Token, TxSide};

    #[derive(Debug, Clone)]
    enum Action {
        Sandwich(usize),
        Manual(usize, bool, u32, u32),
        Reorder(usize, usize),
        Censor(usize),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0usize..12).prop_map(Action::Sandwich),
            (0usize..5, any::<bool>(), 1u32..5000, 1u32..7_000_000)
                .prop_map(|(t, buy, a, p)| Action::Manual(t, buy, a, p)),
            (0usize..12, 0usize..12).prop_map(|(from, to)| Action::Reorder(from, to)),
            (0usize..12).prop_map(Action::Censor),
        ]
    }

    proptest! {
        #[test]
        fn net_equals_gross_for_any_session(
            seed in any::<u64>(),
            actions in prop::collection::vec(action(), 0..12),
        ) {
            let mut state = SimulationState::new(SimulationConfig::default()).unwrap();
            state.reset_with_rng(&mut StdRng::seed_from_u64(seed));

            for action in actions {
                let len = state.queue().len();
                match action {
                    Action::Sandwich(index) => {
                        state.insert_quick_sandwich(index);
                    }
                    Action::Manual(token, buy, amount, price) => {
                        let side = if buy { TxSide::Buy } else { TxSide::Sell };
                        let order = ManualOrder::new(
                            Token::ALL[token],
                            side,
                            Decimal::new(amount as i64, 2),
                            Decimal::new(price as i64, 2),
                        )
                        .unwrap();
                        state.insert_manual(order);
                    }
                    Action::Reorder(from, to) if len > 0 => {
                        let id = state.queue()[from % len].id().clone();
                        state.reorder(&id, to);
                    }
                    Action::Censor(index) if len > 0 => {
                        let id = state.queue()[index % len].id().clone();
                        state.censor(&id);
                    }
                    _ => {}
                }
            }

            let report = state.submit();
            prop_assert_eq!(report.fees, Decimal::ZERO);
            prop_assert_eq!(report.net_profit, report.gross_profit);
            let summed: Decimal = report.profit_breakdown.iter().map(|item| item.profit).sum();
            prop_assert_eq!(report.gross_profit, summed);
            prop_assert!(state.queue().iter().all(|tx| tx.price().is_positive()));
        }
    }
}
