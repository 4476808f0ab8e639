//! Behaviour-driven tests for trade recording, VWSP and the all share index.

use gbce_tests::{
    assert_close, at, market_with_common, sample_market, symbol, Duration, Market, MarketConfig,
    MarketErrorKind, Stock, TradeIndicator, UtcDateTime,
};

// =============================================================================
// Recording Trades
// =============================================================================

#[test]
fn when_trade_is_recorded_last_price_follows_it() {
    // Given: A fresh sample market
    let mut market = sample_market();
    assert_eq!(market.stock("ALE").expect("listed").last_price(), None);

    // When: Two trades are recorded
    market
        .record_trade("ALE", 10, TradeIndicator::Buy, 100.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("ALE", 5, TradeIndicator::Sell, 106.0, Some(at(1)))
        .expect("trade");

    // Then: The stock carries the latest price and the ledger both trades
    assert_eq!(market.stock("ALE").expect("listed").last_price(), Some(106.0));
    assert_eq!(market.ledger().trades("ALE").count(), 2);
}

#[test]
fn when_symbol_is_given_in_lower_case_trade_lands_on_listed_stock() {
    let mut market = sample_market();

    let trade = market
        .record_trade("gin", 1, TradeIndicator::Buy, 99.0, Some(at(0)))
        .expect("trade");

    assert_eq!(trade.symbol().as_str(), "GIN");
}

#[test]
fn when_trades_arrive_out_of_order_history_stays_time_ordered() {
    // Given: Trades recorded with decreasing timestamps
    let mut market = sample_market();
    for (minute, price) in [(5, 50.0), (1, 10.0), (3, 30.0)] {
        market
            .record_trade("POP", 1, TradeIndicator::Buy, price, Some(at(minute)))
            .expect("trade");
    }

    // When: The history is read back
    let prices: Vec<f64> = market.ledger().trades("POP").map(|t| t.price()).collect();

    // Then: It is sorted by timestamp, while last_price is the last recorded
    assert_eq!(prices, vec![10.0, 30.0, 50.0]);
    assert_eq!(market.stock("POP").expect("listed").last_price(), Some(30.0));
}

#[test]
fn trades_since_returns_only_trades_at_or_after_cutoff() {
    let mut market = sample_market();
    for minute in [0, 10, 20] {
        market
            .record_trade("JOE", 1, TradeIndicator::Sell, 100.0, Some(at(minute)))
            .expect("trade");
    }

    let since: Vec<_> = market
        .trades_since("JOE", at(10))
        .expect("listed")
        .map(|t| t.timestamp())
        .collect();

    assert_eq!(since, vec![at(10), at(20)]);
}

// =============================================================================
// Volume Weighted Stock Price
// =============================================================================

#[test]
fn when_trades_fall_inside_window_vwsp_weights_by_quantity() {
    // Given: ALE 10 @ 100 then 5 @ 106
    let mut market = sample_market();
    market
        .record_trade("ALE", 10, TradeIndicator::Buy, 100.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("ALE", 5, TradeIndicator::Sell, 106.0, Some(at(1)))
        .expect("trade");

    // When: VWSP is computed two minutes later
    let vwsp = market
        .volume_weighted_stock_price("ALE", None, Some(at(2)))
        .expect("vwsp");

    // Then: (1000 + 530) / 15
    assert_close(vwsp, 102.0);
}

#[test]
fn when_trade_is_older_than_window_it_is_excluded() {
    // Given: One stale trade and one recent trade
    let mut market = sample_market();
    market
        .record_trade("POP", 1000, TradeIndicator::Buy, 1.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("POP", 10, TradeIndicator::Buy, 50.0, Some(at(20)))
        .expect("trade");

    // When: VWSP is computed over the default 15 minutes ending at minute 20
    let vwsp = market
        .volume_weighted_stock_price("POP", None, Some(at(20)))
        .expect("vwsp");

    // Then: The stale trade contributes nothing
    assert_close(vwsp, 50.0);
}

#[test]
fn trade_exactly_at_window_start_is_included() {
    let mut market = sample_market();
    market
        .record_trade("POP", 2, TradeIndicator::Buy, 10.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("POP", 2, TradeIndicator::Buy, 20.0, Some(at(15)))
        .expect("trade");

    let vwsp = market
        .volume_weighted_stock_price("POP", None, Some(at(15)))
        .expect("vwsp");

    assert_close(vwsp, 15.0);
}

#[test]
fn when_window_is_empty_vwsp_reports_no_trades() {
    // Given: Only a trade well before the window
    let mut market = sample_market();
    market
        .record_trade("TEA", 1, TradeIndicator::Buy, 10.0, Some(at(0)))
        .expect("trade");

    // When: VWSP is requested an hour later
    let error = market
        .volume_weighted_stock_price("TEA", None, Some(at(60)))
        .expect_err("empty window");

    // Then: No silent fallback to last_price
    assert_eq!(error.kind(), MarketErrorKind::NoTradesInWindow);
    assert_eq!(market.stock("TEA").expect("listed").last_price(), Some(10.0));
}

#[test]
fn explicit_window_overrides_configured_default() {
    let mut market =
        Market::with_config(MarketConfig::with_window_minutes(5).expect("positive window"));
    market
        .register_stock(Stock::common(symbol("ABC"), 1.0, 10.0).expect("stock"))
        .expect("register");
    market
        .record_trade("ABC", 1, TradeIndicator::Buy, 10.0, Some(at(0)))
        .expect("trade");

    let default_window = market.volume_weighted_stock_price("ABC", None, Some(at(10)));
    let wide_window =
        market.volume_weighted_stock_price("ABC", Some(Duration::minutes(30)), Some(at(10)));

    assert_eq!(
        default_window.expect_err("outside 5 minutes").kind(),
        MarketErrorKind::NoTradesInWindow
    );
    assert_close(wide_window.expect("inside 30 minutes"), 10.0);
}

#[test]
fn when_window_is_not_positive_vwsp_is_a_validation_error() {
    let market = sample_market();

    let error = market
        .volume_weighted_stock_price("ALE", Some(Duration::ZERO), Some(at(0)))
        .expect_err("zero window");

    assert_eq!(error.kind(), MarketErrorKind::Validation);
}

// =============================================================================
// All Share Index
// =============================================================================

#[test]
fn when_single_stock_has_traded_index_equals_its_price() {
    let mut market = sample_market();
    market
        .record_trade("GIN", 3, TradeIndicator::Buy, 77.0, Some(at(0)))
        .expect("trade");

    assert_close(market.all_share_index(None).expect("index"), 77.0);
}

#[test]
fn when_two_stocks_trade_at_1_and_4_index_is_2() {
    let mut market = market_with_common(&[("AAA", 1.0), ("BBB", 1.0), ("CCC", 1.0)]);
    market
        .record_trade("AAA", 1, TradeIndicator::Buy, 1.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("BBB", 1, TradeIndicator::Buy, 4.0, Some(at(0)))
        .expect("trade");

    // CCC never traded and is not a constituent.
    assert_close(market.all_share_index(None).expect("index"), 2.0);
}

#[test]
fn when_three_stocks_trade_at_cubes_index_is_their_root() {
    let mut market = market_with_common(&[("AAA", 1.0), ("BBB", 1.0), ("CCC", 1.0)]);
    for (name, price) in [("AAA", 1.0), ("BBB", 8.0), ("CCC", 27.0)] {
        market
            .record_trade(name, 1, TradeIndicator::Sell, price, Some(at(0)))
            .expect("trade");
    }

    assert_close(market.all_share_index(None).expect("index"), 6.0);
}

#[test]
fn reference_session_index_is_root_of_product() {
    // Given: JOE 100 @ 200 buy and TEA 100 @ 100 sell
    let mut market = sample_market();
    market
        .record_trade("JOE", 100, TradeIndicator::Buy, 200.0, Some(at(0)))
        .expect("trade");
    market
        .record_trade("TEA", 100, TradeIndicator::Sell, 100.0, Some(at(0)))
        .expect("trade");

    // When / Then: sqrt(200 * 100)
    assert_close(market.all_share_index(None).expect("index"), 20_000f64.sqrt());
}

#[test]
fn when_late_trade_arrives_index_follows_last_price_for_any_as_of() {
    // Given: JOE trades at 200 stamped minute 10, then a late trade at 50
    // stamped minute 0
    let mut market = sample_market();
    market
        .record_trade("JOE", 1, TradeIndicator::Buy, 200.0, Some(at(10)))
        .expect("trade");
    market
        .record_trade("JOE", 1, TradeIndicator::Sell, 50.0, Some(at(0)))
        .expect("late trade");

    // When: The index is evaluated at several instants
    let latest = market.all_share_index(None).expect("index");
    let now = market
        .all_share_index(Some(UtcDateTime::now()))
        .expect("index");

    // Then: last_price is the late trade, history stays time ordered, and
    // every evaluation uses last_price
    assert_eq!(market.stock("JOE").expect("listed").last_price(), Some(50.0));
    let prices: Vec<f64> = market.ledger().trades("JOE").map(|t| t.price()).collect();
    assert_eq!(prices, vec![50.0, 200.0]);
    assert_close(latest, 50.0);
    assert_eq!(now, latest);
    for as_of in [at(-100), at(5), at(20)] {
        assert_close(market.all_share_index(Some(as_of)).expect("index"), 50.0);
    }
}

#[test]
fn when_trade_is_stamped_in_future_it_still_counts_towards_index() {
    // Given: TEA's only trade carries a timestamp far ahead of now
    let mut market = sample_market();
    let future = UtcDateTime::parse("2099-01-01T00:00:00Z").expect("timestamp");
    market
        .record_trade("TEA", 1, TradeIndicator::Buy, 100.0, Some(future))
        .expect("trade");

    // When: The index and the report are evaluated now
    let latest = market.all_share_index(None).expect("index");
    let now = market
        .all_share_index(Some(UtcDateTime::now()))
        .expect("not an empty market");
    let report = market.report(None);

    // Then: TEA is a constituent in every evaluation
    assert_close(latest, 100.0);
    assert_eq!(now, latest);
    assert_close(report.all_share_index.value().expect("index"), 100.0);
}

#[test]
fn index_is_idempotent_without_intervening_trades() {
    let mut market = sample_market();
    market
        .record_trade("ALE", 7, TradeIndicator::Buy, 61.5, Some(at(0)))
        .expect("trade");
    market
        .record_trade("JOE", 3, TradeIndicator::Sell, 249.0, Some(at(0)))
        .expect("trade");

    let first = market.all_share_index(None).expect("index");
    let second = market.all_share_index(None).expect("index");

    assert_eq!(first, second);
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn report_lists_every_stock_with_per_metric_outcomes() {
    // Given: Only JOE has traded
    let mut market = sample_market();
    market
        .record_trade("JOE", 100, TradeIndicator::Buy, 200.0, Some(at(0)))
        .expect("trade");

    // When: A report is taken a minute later
    let report = market.report(Some(at(1)));

    // Then: Every listing appears, with failures captured per metric
    let symbols: Vec<&str> = report.stocks.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["TEA", "POP", "ALE", "GIN", "JOE"]);

    let joe = &report.stocks[4];
    assert_eq!(joe.vwsp.value(), Some(200.0));
    assert_eq!(joe.trade_count, 1);

    let tea = &report.stocks[0];
    assert_eq!(tea.pe_ratio.error_code(), Some("market.undefined_ratio"));
    assert_eq!(tea.vwsp.error_code(), Some("market.no_trades_in_window"));

    assert_close(report.all_share_index.value().expect("index"), 200.0);
    assert_eq!(report.window_secs, 15 * 60);
}

#[test]
fn report_serializes_values_and_error_codes_side_by_side() {
    let mut market = sample_market();
    market
        .record_trade("POP", 4, TradeIndicator::Buy, 80.0, Some(at(0)))
        .expect("trade");

    let json = serde_json::to_value(market.report(Some(at(1)))).expect("serialize");

    assert_eq!(json["as_of"], "2023-11-14T22:14:20Z");
    assert_eq!(json["stocks"][1]["symbol"], "POP");
    assert_eq!(json["stocks"][1]["pe_ratio"]["value"], 10.0);
    assert_eq!(
        json["stocks"][2]["dividend_yield"]["error"]["code"],
        "market.invalid_price"
    );
}
