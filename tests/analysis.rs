// End-to-end tests over the public API: wire shapes in, reports and
// rationale documents out.

use market_pulse::analysis::{book, tape, MarketAnalyzer, MetricName, MetricValue, TraderType};
use market_pulse::binance::types::into_trades;
use market_pulse::binance::{DepthSnapshot, RawTrade};
use market_pulse::config::AnalyzerConfig;
use market_pulse::error::AnalysisError;
use market_pulse::market::{OrderBook, Side, Trade};
use market_pulse::report;

fn sample_book() -> OrderBook {
    OrderBook::from_levels(
        &[(100.0, 2.0), (99.0, 5.0)],
        &[(101.0, 1.0), (102.0, 4.0)],
        42,
    )
}

fn sample_trades() -> Vec<Trade> {
    vec![
        Trade::new(1000, 100.0, 1.0, Side::Buy),
        Trade::new(2000, 102.0, 1.0, Side::Sell),
    ]
}

#[test]
fn worked_example_book_metrics() {
    let book = sample_book();
    assert_eq!(book::spread(&book).unwrap(), 1.0);
    assert_eq!(book::depth(&book, 10), (7.0, 5.0));
    assert!((book::imbalance(&book, 10) - 2.0 / 12.0).abs() < 1e-12);
}

#[test]
fn worked_example_market_report() {
    let report = MarketAnalyzer::new()
        .market_report(&sample_book(), &sample_trades())
        .unwrap();

    assert_eq!(
        report.get(MetricName::Vwap).unwrap().value,
        MetricValue::Single(101.0)
    );
    assert_eq!(
        report.get(MetricName::NetOrderFlow).unwrap().value,
        MetricValue::Single(0.0)
    );
    assert_eq!(
        report.get(MetricName::MarketImpact).unwrap().value,
        MetricValue::Single(2.0)
    );
    assert_eq!(
        report.get(MetricName::OrderBookImbalance).unwrap().value,
        MetricValue::Single(0.1667)
    );
}

#[test]
fn crossed_book_reports_negative_spread_without_panicking() {
    let crossed = OrderBook::from_levels(&[(102.5, 1.0)], &[(101.0, 1.0)], 0);
    assert_eq!(book::spread(&crossed).unwrap(), -1.5);

    let report = MarketAnalyzer::new().order_book_report(&crossed).unwrap();
    assert_eq!(report.spread, -1.5);
    assert!((1..=10).contains(&report.bullishness_score));
}

#[test]
fn scores_stay_in_bounds_under_extreme_books() {
    let analyzer = MarketAnalyzer::new();
    let volumes = [0.0, 0.0005, 0.5, 80.0, 5000.0];

    for &bid_qty in &volumes {
        for &ask_qty in &volumes {
            let book = OrderBook::from_levels(&[(100.0, bid_qty)], &[(100.5, ask_qty)], 0);
            let report = analyzer.order_book_report(&book).unwrap();
            assert!(
                (1..=10).contains(&report.bullishness_score),
                "score out of range for bid={} ask={}",
                bid_qty,
                ask_qty
            );
        }
    }
}

#[test]
fn scores_stay_in_bounds_under_extreme_tapes() {
    let analyzer = MarketAnalyzer::new();
    let shapes: [&[(f64, Side)]; 4] = [
        &[(1000.0, Side::Buy)],
        &[(0.0, Side::Sell), (0.0, Side::Buy)],
        &[(5.0, Side::Buy), (0.0001, Side::Sell)],
        &[(0.0001, Side::Buy), (900.0, Side::Sell)],
    ];

    for shape in shapes {
        let trades: Vec<Trade> = shape
            .iter()
            .enumerate()
            .map(|(i, &(volume, side))| Trade::new(i as i64, 100.0, volume, side))
            .collect();
        let report = analyzer.trade_report(&trades).unwrap();
        assert!((1..=10).contains(&report.bullishness_score));
    }
}

#[test]
fn classification_priority_rule_one_wins() {
    // Synthetic tape matching both the retail and professional rules:
    // retail-looking aggregates with more than ten large trades.
    let mut trades = Vec::new();
    for i in 0..15 {
        trades.push(Trade::new(i, 100.0, 1.0, Side::Buy));
    }
    for i in 15..2000 {
        trades.push(Trade::new(i, 100.0, 0.001, Side::Sell));
    }

    let report = MarketAnalyzer::new().trade_report(&trades).unwrap();
    assert!(report.profile.large_trade_count > 10);
    assert_eq!(report.profile.trader_type, TraderType::Retail);
}

#[test]
fn empty_inputs_error_cleanly() {
    let analyzer = MarketAnalyzer::new();

    assert!(matches!(
        analyzer.trade_report(&[]),
        Err(AnalysisError::InvalidInput(_))
    ));

    let no_bids = OrderBook::from_levels(&[], &[(101.0, 1.0)], 0);
    assert!(matches!(
        analyzer.order_book_report(&no_bids),
        Err(AnalysisError::InsufficientData(_))
    ));

    // Depth and imbalance degrade instead of erroring.
    assert_eq!(book::depth(&no_bids, 10), (0.0, 1.0));
    let empty = OrderBook::from_levels(&[], &[], 0);
    assert_eq!(book::imbalance(&empty, 10), 0.0);
}

#[test]
fn net_order_flow_negates_under_side_swap() {
    let trades = vec![
        Trade::new(1, 100.0, 2.5, Side::Buy),
        Trade::new(2, 100.5, 1.25, Side::Sell),
        Trade::new(3, 101.0, 4.0, Side::Buy),
    ];
    let swapped: Vec<Trade> = trades
        .iter()
        .map(|t| {
            let side = match t.side {
                Side::Buy => Side::Sell,
                Side::Sell => Side::Buy,
            };
            Trade::new(t.timestamp, t.price, t.volume, side)
        })
        .collect();

    assert_eq!(
        tape::net_order_flow(&trades),
        -tape::net_order_flow(&swapped)
    );
}

#[test]
fn wire_to_rationale_round_trip() {
    let depth_json = r#"{
        "lastUpdateId": 99132,
        "bids": [["27123.50", "0.412"], ["27120.00", "1.100"]],
        "asks": [["27124.10", "0.250"], ["27130.00", "2.000"]]
    }"#;
    let trades_json = r#"[
        {"id": 1, "price": "27123.90", "qty": "0.020", "quoteQty": "542.47",
         "time": 1700000000000, "isBuyerMaker": false, "isBestMatch": true},
        {"id": 2, "price": "27124.10", "qty": "0.015", "quoteQty": "406.86",
         "time": 1700000000250, "isBuyerMaker": true, "isBestMatch": true}
    ]"#;

    let snapshot: DepthSnapshot = serde_json::from_str(depth_json).unwrap();
    let raw: Vec<RawTrade> = serde_json::from_str(trades_json).unwrap();

    let book = snapshot.into_order_book().unwrap();
    let trades = into_trades(raw).unwrap();

    let analyzer = MarketAnalyzer::new();
    let book_report = analyzer.order_book_report(&book).unwrap();
    let tape_report = analyzer.trade_report(&trades).unwrap();

    assert_eq!(book_report.last_update_id, 99132);
    assert_eq!(tape_report.last_trade_time, 1700000000250);
    assert_eq!(tape_report.buy_count, 1);

    let book_doc = report::render_book_rationale(&book_report, &analyzer.config().book);
    assert!(book_doc.starts_with("# Rationale for Order Book Analysis"));
    assert!(book_doc.contains("## Score Interpretation"));

    let tape_doc =
        report::render_trade_rationale(&tape_report, &analyzer.config().tape, "BTCUSDT");
    assert!(tape_doc.starts_with("# Trades Rationale for BTCUSDT"));
    assert!(tape_doc.contains("## Retail vs. Professional Assessment"));
    assert!(tape_doc.contains("## Score Interpretation"));
}

#[test]
fn report_serialization_uses_contract_field_names() {
    let analyzer = MarketAnalyzer::new();
    let report = analyzer.order_book_report(&sample_book()).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["bullishness_score"], 2);
    assert_eq!(json["current_price"], 100.0);
    assert_eq!(json["last_update_id"], 42);
    assert!(json["breakdown"]["near_ratio"].is_number());

    let tape_report = analyzer.trade_report(&sample_trades()).unwrap();
    let json = serde_json::to_value(&tape_report).unwrap();
    assert_eq!(json["trade_count"], 2);
    assert_eq!(json["last_trade_time"], 2000);
    assert_eq!(json["profile"]["trader_type"], "Professional/Institutional");
}

#[test]
fn custom_config_changes_scoring_without_code_edits() {
    // Widening the near band to cover the whole book and shifting all
    // weight onto it must move the score; the default band excludes the
    // far levels.
    let book = OrderBook::from_levels(
        &[(100.0, 1.0), (50.0, 500.0)],
        &[(101.0, 1.0), (150.0, 500.0)],
        0,
    );

    let default_report = MarketAnalyzer::new().order_book_report(&book).unwrap();
    assert_eq!(default_report.near_bid_volume, 1.0);

    let mut config = AnalyzerConfig::default();
    config.book.near_band = 100.0;
    let wide = MarketAnalyzer::with_config(config).unwrap();
    let wide_report = wide.order_book_report(&book).unwrap();
    assert_eq!(wide_report.near_bid_volume, 501.0);
    assert_eq!(wide_report.near_ask_volume, 501.0);
}
