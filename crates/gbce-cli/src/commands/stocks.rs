use serde::Serialize;
use serde_json::Value;

use gbce_core::{Market, Stock};

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct StocksResponseData<'a> {
    count: usize,
    stocks: Vec<&'a Stock>,
}

pub fn run(market: &Market) -> Result<Value, CliError> {
    let stocks: Vec<&Stock> = market.stocks().collect();
    Ok(serde_json::to_value(StocksResponseData {
        count: stocks.len(),
        stocks,
    })?)
}
