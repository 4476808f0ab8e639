mod demo;
mod metrics;
mod report;
mod seed;
mod stocks;

use gbce_core::{MarketConfig, UtcDateTime};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let as_of = cli.as_of.as_deref().map(UtcDateTime::parse).transpose()?;
    let config = MarketConfig::with_window_minutes(cli.window_minutes)?;
    let mut market = seed::build_market(cli, config)?;

    match &cli.command {
        Command::Stocks => stocks::run(&market),
        Command::DividendYield(args) => metrics::dividend_yield(&market, args),
        Command::PeRatio(args) => metrics::pe_ratio(&market, args),
        Command::Vwsp(args) => metrics::vwsp(&market, args, as_of),
        Command::Index => metrics::index(&market, as_of),
        Command::Report => report::run(&market, as_of),
        Command::Demo => demo::run(&mut market),
    }
}
