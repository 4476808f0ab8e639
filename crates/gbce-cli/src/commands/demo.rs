use serde::Serialize;
use serde_json::Value;

use gbce_core::{Market, Trade, TradeIndicator};

use crate::error::CliError;

const REFERENCE_PRICE: f64 = 100.0;

#[derive(Debug, Serialize)]
struct DemoData {
    recorded: Vec<Trade>,
    pop_pe_ratio: f64,
    pop_dividend_yield: f64,
    gin_dividend_yield: f64,
    joe_vwsp: f64,
    all_share_index: f64,
}

/// Reference session: two trades, then the headline metrics. The index is
/// `sqrt(200 * 100) ≈ 141.42`.
pub fn run(market: &mut Market) -> Result<Value, CliError> {
    let recorded = vec![
        market
            .record_trade("JOE", 100, TradeIndicator::Buy, 200.0, None)?
            .clone(),
        market
            .record_trade("TEA", 100, TradeIndicator::Sell, 100.0, None)?
            .clone(),
    ];

    let data = DemoData {
        recorded,
        pop_pe_ratio: market.pe_ratio("POP", Some(REFERENCE_PRICE))?,
        pop_dividend_yield: market.dividend_yield("POP", Some(REFERENCE_PRICE))?,
        gin_dividend_yield: market.dividend_yield("GIN", Some(REFERENCE_PRICE))?,
        joe_vwsp: market.volume_weighted_stock_price("JOE", None, None)?,
        all_share_index: market.all_share_index(None)?,
    };
    Ok(serde_json::to_value(data)?)
}
