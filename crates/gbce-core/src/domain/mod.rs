//! # Domain Models
//!
//! Validated value types for the exchange.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker, primary key of the catalog |
//! | [`UtcDateTime`] | UTC timestamp of a trade |
//! | [`Stock`] | Listed instrument with dividend parameters and last price |
//! | [`StockKind`] | Common or preferred, with the preferred-only fixed dividend |
//! | [`Trade`] | Executed transaction against a symbol |
//! | [`TradeIndicator`] | Buy or sell |
//!
//! Every constructor checks its invariants and returns a
//! [`ValidationError`](crate::ValidationError) instead of building an
//! invalid value:
//!
//! ```rust
//! use gbce_core::{Stock, StockType, Symbol, ValidationError};
//!
//! let gin = Symbol::parse("GIN").unwrap();
//! let err = Stock::new(gin, StockType::Preferred, 8.0, None, 100.0).unwrap_err();
//! assert_eq!(err, ValidationError::MissingFixedDividend);
//! ```

mod checks;
mod stock;
mod symbol;
mod timestamp;
mod trade;

pub use stock::{Stock, StockKind, StockType};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
pub use trade::{Trade, TradeIndicator};
