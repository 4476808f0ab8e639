use thiserror::Error;

use crate::Symbol;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("invalid stock type '{value}', expected one of common, preferred")]
    InvalidStockType { value: String },
    #[error("invalid trade indicator '{value}', expected one of buy, sell")]
    InvalidIndicator { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },

    #[error("fixed dividend {value} must be a fraction within [0, 1]")]
    FixedDividendOutOfRange { value: f64 },
    #[error("preferred stock requires a fixed dividend")]
    MissingFixedDividend,
    #[error("common stock must not carry a fixed dividend")]
    UnexpectedFixedDividend,

    #[error("trade quantity must be greater than zero")]
    ZeroQuantity,

    #[error("window must be a positive duration")]
    NonPositiveWindow,
}

/// Coarse category of a [`MarketError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketErrorKind {
    Validation,
    DuplicateStock,
    UnknownStock,
    InvalidPrice,
    UndefinedRatio,
    NoTradesInWindow,
    EmptyMarket,
}

/// Errors surfaced by catalog, ledger and market operations.
///
/// Every variant is a data or programming error; none of them is transient,
/// so callers decide on any fallback themselves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("stock '{symbol}' is already registered")]
    DuplicateStock { symbol: Symbol },

    /// `symbol` is the normalized ticker, or the caller's text when it is not
    /// a well-formed ticker and so can never be listed.
    #[error("stock '{symbol}' is not registered")]
    UnknownStock { symbol: String },

    #[error("{}", invalid_price_message(.symbol, .price))]
    InvalidPrice {
        symbol: Option<Symbol>,
        price: Option<f64>,
    },

    #[error("P/E ratio for '{symbol}' is undefined: last dividend is zero")]
    UndefinedRatio { symbol: Symbol },

    #[error("no trades for '{symbol}' in the last {window_secs}s")]
    NoTradesInWindow { symbol: Symbol, window_secs: i64 },

    #[error("all share index requires at least one traded stock")]
    EmptyMarket,
}

impl MarketError {
    pub fn unknown_stock(symbol: impl Into<String>) -> Self {
        Self::UnknownStock {
            symbol: symbol.into(),
        }
    }

    pub fn invalid_price(symbol: &Symbol, price: f64) -> Self {
        Self::InvalidPrice {
            symbol: Some(symbol.clone()),
            price: Some(price),
        }
    }

    pub fn unresolved_price(symbol: &Symbol) -> Self {
        Self::InvalidPrice {
            symbol: Some(symbol.clone()),
            price: None,
        }
    }

    pub const fn kind(&self) -> MarketErrorKind {
        match self {
            Self::Validation(_) => MarketErrorKind::Validation,
            Self::DuplicateStock { .. } => MarketErrorKind::DuplicateStock,
            Self::UnknownStock { .. } => MarketErrorKind::UnknownStock,
            Self::InvalidPrice { .. } => MarketErrorKind::InvalidPrice,
            Self::UndefinedRatio { .. } => MarketErrorKind::UndefinedRatio,
            Self::NoTradesInWindow { .. } => MarketErrorKind::NoTradesInWindow,
            Self::EmptyMarket => MarketErrorKind::EmptyMarket,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            MarketErrorKind::Validation => "market.validation",
            MarketErrorKind::DuplicateStock => "market.duplicate_stock",
            MarketErrorKind::UnknownStock => "market.unknown_stock",
            MarketErrorKind::InvalidPrice => "market.invalid_price",
            MarketErrorKind::UndefinedRatio => "market.undefined_ratio",
            MarketErrorKind::NoTradesInWindow => "market.no_trades_in_window",
            MarketErrorKind::EmptyMarket => "market.empty_market",
        }
    }
}

fn invalid_price_message(symbol: &Option<Symbol>, price: &Option<f64>) -> String {
    match (symbol, price) {
        (Some(symbol), Some(price)) => {
            format!("price {price} for '{symbol}' must be greater than zero")
        }
        (Some(symbol), None) => {
            format!("no price given and no trade recorded for '{symbol}'")
        }
        (None, Some(price)) => format!("price {price} must be greater than zero"),
        (None, None) => String::from("price could not be resolved"),
    }
}
