use serde::Serialize;
use serde_json::Value;

use gbce_core::{Market, Symbol, UtcDateTime};

use crate::cli::{PriceArgs, SymbolArgs};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PriceMetricData {
    symbol: Symbol,
    price: Option<f64>,
    value: f64,
}

#[derive(Debug, Serialize)]
struct VwspData {
    symbol: Symbol,
    as_of: UtcDateTime,
    window_secs: i64,
    vwsp: f64,
}

#[derive(Debug, Serialize)]
struct IndexData {
    as_of: Option<UtcDateTime>,
    all_share_index: f64,
}

pub fn dividend_yield(market: &Market, args: &PriceArgs) -> Result<Value, CliError> {
    let value = market.dividend_yield(&args.symbol, args.price)?;
    price_metric(market, args, value)
}

pub fn pe_ratio(market: &Market, args: &PriceArgs) -> Result<Value, CliError> {
    let value = market.pe_ratio(&args.symbol, args.price)?;
    price_metric(market, args, value)
}

pub fn vwsp(
    market: &Market,
    args: &SymbolArgs,
    as_of: Option<UtcDateTime>,
) -> Result<Value, CliError> {
    let as_of = as_of.unwrap_or_else(UtcDateTime::now);
    let window = market.vwsp_default_window();
    let vwsp = market.volume_weighted_stock_price(&args.symbol, Some(window), Some(as_of))?;

    Ok(serde_json::to_value(VwspData {
        symbol: market.stock(&args.symbol)?.symbol().clone(),
        as_of,
        window_secs: window.whole_seconds(),
        vwsp,
    })?)
}

pub fn index(market: &Market, as_of: Option<UtcDateTime>) -> Result<Value, CliError> {
    let all_share_index = market.all_share_index(as_of)?;
    Ok(serde_json::to_value(IndexData {
        as_of,
        all_share_index,
    })?)
}

fn price_metric(market: &Market, args: &PriceArgs, value: f64) -> Result<Value, CliError> {
    let stock = market.stock(&args.symbol)?;
    Ok(serde_json::to_value(PriceMetricData {
        symbol: stock.symbol().clone(),
        price: args.price.or(stock.last_price()),
        value,
    })?)
}
