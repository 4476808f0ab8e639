use std::str::FromStr;

use gbce_core::{
    sample, Market, MarketConfig, Stock, StockType, Symbol, TradeIndicator, UtcDateTime,
};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;

/// Trade parsed from `SYMBOL:buy|sell:QUANTITY:PRICE[:RFC3339]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSpec {
    pub symbol: String,
    pub indicator: TradeIndicator,
    pub quantity: u64,
    pub price: f64,
    pub timestamp: Option<UtcDateTime>,
}

pub fn build_market(cli: &Cli, config: MarketConfig) -> Result<Market, CliError> {
    let mut market = Market::with_config(config);
    if !cli.no_sample {
        for stock in sample::gbce_stocks()? {
            market.register_stock(stock)?;
        }
    }

    for spec in &cli.stocks {
        market.register_stock(parse_stock_spec(spec)?)?;
    }

    for spec in &cli.trades {
        let trade = parse_trade_spec(spec)?;
        market.record_trade(
            &trade.symbol,
            trade.quantity,
            trade.indicator,
            trade.price,
            trade.timestamp,
        )?;
    }

    info!(
        stocks = market.catalog().len(),
        trades = market.ledger().len(),
        "market seeded"
    );
    Ok(market)
}

pub fn parse_stock_spec(spec: &str) -> Result<Stock, CliError> {
    let parts: Vec<&str> = spec.split(':').collect();
    let (symbol, stock_type) = match parts.as_slice() {
        [symbol, stock_type, ..] => (Symbol::parse(symbol)?, StockType::from_str(stock_type)?),
        _ => return Err(CliError::spec("stock", spec, "expected SYMBOL:TYPE:...")),
    };

    let (last_dividend, fixed_dividend, par_value) = match (stock_type, &parts[2..]) {
        (StockType::Common, [last_dividend, par_value]) => (
            number("stock", spec, "last dividend", last_dividend)?,
            None,
            number("stock", spec, "par value", par_value)?,
        ),
        (StockType::Preferred, [last_dividend, fixed_dividend, par_value]) => (
            number("stock", spec, "last dividend", last_dividend)?,
            Some(number("stock", spec, "fixed dividend", fixed_dividend)?),
            number("stock", spec, "par value", par_value)?,
        ),
        (StockType::Common, _) => {
            return Err(CliError::spec(
                "stock",
                spec,
                "expected SYMBOL:common:LAST_DIVIDEND:PAR",
            ))
        }
        (StockType::Preferred, _) => {
            return Err(CliError::spec(
                "stock",
                spec,
                "expected SYMBOL:preferred:LAST_DIVIDEND:FIXED_DIVIDEND:PAR",
            ))
        }
    };

    Ok(Stock::new(
        symbol,
        stock_type,
        last_dividend,
        fixed_dividend,
        par_value,
    )?)
}

pub fn parse_trade_spec(spec: &str) -> Result<TradeSpec, CliError> {
    // The timestamp itself contains ':' so it takes the remainder.
    let parts: Vec<&str> = spec.splitn(5, ':').collect();
    let [symbol, indicator, quantity, price, rest @ ..] = parts.as_slice() else {
        return Err(CliError::spec(
            "trade",
            spec,
            "expected SYMBOL:buy|sell:QUANTITY:PRICE[:RFC3339]",
        ));
    };

    let quantity = quantity
        .trim()
        .parse::<u64>()
        .map_err(|error| CliError::spec("trade", spec, format!("quantity: {error}")))?;
    let timestamp = rest
        .first()
        .map(|raw| UtcDateTime::parse(raw.trim()))
        .transpose()?;

    Ok(TradeSpec {
        symbol: symbol.trim().to_owned(),
        indicator: TradeIndicator::from_str(indicator)?,
        quantity,
        price: number("trade", spec, "price", price)?,
        timestamp,
    })
}

fn number(what: &'static str, spec: &str, field: &str, raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|error| CliError::spec(what, spec, format!("{field}: {error}")))
}
