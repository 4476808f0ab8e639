//! CLI argument definitions for gbce.
//!
//! Every invocation builds a fresh in-memory market: the GBCE sample
//! listings (unless `--no-sample`), any `--stock` listings, then any
//! `--trade` records, before running the requested command.
//!
//! # Examples
//!
//! ```bash
//! gbce dividend-yield GIN --price 100
//! gbce --trade JOE:buy:100:200 --trade TEA:sell:100:100 index
//! gbce --trade ALE:buy:10:100 --trade ALE:sell:5:106 vwsp ALE --pretty
//! gbce --no-sample --stock XYZ:preferred:1:0.05:10 stocks --format table
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Global Beverage Corporation Exchange calculator.
#[derive(Debug, Parser)]
#[command(
    name = "gbce",
    author,
    version,
    about = "Stock metrics for the Global Beverage Corporation Exchange"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log at debug level unless GBCE_LOG or RUST_LOG says otherwise.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// VWSP trailing window in minutes.
    #[arg(long, global = true, default_value_t = 15)]
    pub window_minutes: i64,

    /// Evaluate time-dependent metrics at this RFC3339 UTC instant instead of now.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Start from an empty catalog instead of the GBCE sample listings.
    #[arg(long, global = true, default_value_t = false)]
    pub no_sample: bool,

    /// Register a stock: SYMBOL:common:LAST_DIVIDEND:PAR or
    /// SYMBOL:preferred:LAST_DIVIDEND:FIXED_DIVIDEND:PAR.
    #[arg(long = "stock", global = true, value_name = "SPEC")]
    pub stocks: Vec<String>,

    /// Record a trade: SYMBOL:buy|sell:QUANTITY:PRICE[:RFC3339].
    #[arg(long = "trade", global = true, value_name = "SPEC")]
    pub trades: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines for terminal display.
    Table,
    /// Single JSON document.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered stocks in registration order.
    Stocks,

    /// Dividend yield for a stock.
    ///
    /// Uses --price when given, otherwise the last traded price.
    DividendYield(PriceArgs),

    /// Price/earnings ratio for a stock.
    ///
    /// Uses --price when given, otherwise the last traded price.
    PeRatio(PriceArgs),

    /// Volume weighted stock price over the trailing window.
    Vwsp(SymbolArgs),

    /// Geometric mean of last traded prices across traded stocks.
    Index,

    /// Every metric for every stock.
    Report,

    /// Replay the reference session: JOE 100 @ 200 buy, TEA 100 @ 100 sell.
    Demo,
}

/// Arguments for commands that take a symbol and an optional price.
#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Stock symbol (case-insensitive).
    pub symbol: String,

    /// Price to evaluate at; defaults to the last traded price.
    #[arg(long)]
    pub price: Option<f64>,
}

/// Arguments for commands that take a symbol only.
#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Stock symbol (case-insensitive).
    pub symbol: String,
}
