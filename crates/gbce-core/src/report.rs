//! Serializable snapshot of every metric the market derives.

use serde::Serialize;

use crate::{MarketError, StockType, Symbol, UtcDateTime};

/// Outcome of one metric: a number, or the error that prevented it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Value(f64),
    Error { code: &'static str, message: String },
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Error { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Value(_) => None,
            Self::Error { code, .. } => Some(*code),
        }
    }
}

impl From<Result<f64, MarketError>> for Metric {
    fn from(result: Result<f64, MarketError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error {
                code: error.code(),
                message: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub symbol: Symbol,
    pub stock_type: StockType,
    pub last_price: Option<f64>,
    pub trade_count: usize,
    pub dividend_yield: Metric,
    pub pe_ratio: Metric,
    pub vwsp: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub as_of: UtcDateTime,
    pub window_secs: i64,
    pub stocks: Vec<StockReport>,
    pub all_share_index: Metric,
}
