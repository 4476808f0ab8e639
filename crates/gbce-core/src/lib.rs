//! # GBCE Core
//!
//! Domain model and metric engine for the Global Beverage Corporation
//! Exchange, a deliberately small stock exchange.
//!
//! ## Overview
//!
//! - **Stocks** are common or preferred listings with dividend parameters.
//! - **Trades** are immutable records of executed buys and sells.
//! - The **catalog** registers stocks; the **ledger** stores trades per symbol.
//! - The **market** composes both and derives dividend yield, P/E ratio,
//!   volume weighted stock price (VWSP) and the all share index.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Symbol, timestamp, Stock and Trade value types |
//! | [`catalog`] | Symbol → Stock registry |
//! | [`ledger`] | Append-only, time-ordered trade history |
//! | [`market`] | Single-owner market and its calculations |
//! | [`shared`] | Thread-safe market with per-symbol locking |
//! | [`pricing`] | VWSP and geometric mean aggregations |
//! | [`report`] | Serializable metric snapshot |
//! | [`sample`] | Reference GBCE listings |
//! | [`config`] | Market tunables |
//! | [`error`] | Validation and market errors |
//!
//! ## Quick Start
//!
//! ```rust
//! use gbce_core::{Market, TradeIndicator};
//!
//! # fn main() -> Result<(), gbce_core::MarketError> {
//! let mut market = Market::with_sample_stocks()?;
//! market.record_trade("JOE", 100, TradeIndicator::Buy, 200.0, None)?;
//! market.record_trade("TEA", 100, TradeIndicator::Sell, 100.0, None)?;
//!
//! let index = market.all_share_index(None)?;
//! assert!((index - 141.421356).abs() < 1e-5);
//!
//! assert_eq!(market.dividend_yield("JOE", Some(130.0))?, 0.1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns a [`MarketError`] immediately; nothing is retried
//! or silently defaulted. A caller wanting a VWSP fallback does it itself:
//!
//! ```rust
//! use gbce_core::{Market, MarketErrorKind};
//!
//! # fn main() -> Result<(), gbce_core::MarketError> {
//! let market = Market::with_sample_stocks()?;
//! let price = match market.volume_weighted_stock_price("POP", None, None) {
//!     Ok(vwsp) => Some(vwsp),
//!     Err(error) if error.kind() == MarketErrorKind::NoTradesInWindow => {
//!         market.stock("POP")?.last_price()
//!     }
//!     Err(error) => return Err(error),
//! };
//! assert_eq!(price, None);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod market;
pub mod pricing;
pub mod report;
pub mod sample;
pub mod shared;

pub use catalog::StockCatalog;
pub use config::{MarketConfig, DEFAULT_VWSP_WINDOW};
pub use domain::{Stock, StockKind, StockType, Symbol, Trade, TradeIndicator, UtcDateTime};
pub use error::{MarketError, MarketErrorKind, ValidationError};
pub use ledger::TradeLedger;
pub use market::Market;
pub use report::{MarketReport, Metric, StockReport};
pub use shared::SharedMarket;

// Callers pass windows as `time::Duration`.
pub use time::Duration;
