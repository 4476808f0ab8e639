use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checks;
use crate::{MarketError, Symbol, ValidationError};

/// Plain discriminant of a listing, as used on the command line and in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockType {
    Common,
    Preferred,
}

impl StockType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Preferred => "preferred",
        }
    }
}

impl Display for StockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Self::Common),
            "preferred" => Ok(Self::Preferred),
            other => Err(ValidationError::InvalidStockType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Listing variant together with the fields only that variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockKind {
    Common,
    /// `fixed_dividend` is a fraction of par value, e.g. `0.02` for 2%.
    Preferred { fixed_dividend: f64 },
}

impl StockKind {
    pub const fn stock_type(self) -> StockType {
        match self {
            Self::Common => StockType::Common,
            Self::Preferred { .. } => StockType::Preferred,
        }
    }

    pub const fn fixed_dividend(self) -> Option<f64> {
        match self {
            Self::Common => None,
            Self::Preferred { fixed_dividend } => Some(fixed_dividend),
        }
    }
}

/// A listed instrument.
///
/// Attributes are fixed at construction; only `last_price` moves, and only
/// the market moves it when a trade is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stock {
    symbol: Symbol,
    #[serde(flatten)]
    kind: StockKind,
    last_dividend: f64,
    par_value: f64,
    last_price: Option<f64>,
}

impl Stock {
    /// Build a stock from loose parts, checking that `fixed_dividend` is
    /// present exactly when `stock_type` is preferred.
    pub fn new(
        symbol: Symbol,
        stock_type: StockType,
        last_dividend: f64,
        fixed_dividend: Option<f64>,
        par_value: f64,
    ) -> Result<Self, ValidationError> {
        let kind = match (stock_type, fixed_dividend) {
            (StockType::Common, None) => StockKind::Common,
            (StockType::Common, Some(_)) => return Err(ValidationError::UnexpectedFixedDividend),
            (StockType::Preferred, Some(value)) => StockKind::Preferred {
                fixed_dividend: checks::unit_fraction(value)?,
            },
            (StockType::Preferred, None) => return Err(ValidationError::MissingFixedDividend),
        };

        Ok(Self {
            symbol,
            kind,
            last_dividend: checks::non_negative("last_dividend", last_dividend)?,
            par_value: checks::positive("par_value", par_value)?,
            last_price: None,
        })
    }

    pub fn common(
        symbol: Symbol,
        last_dividend: f64,
        par_value: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(symbol, StockType::Common, last_dividend, None, par_value)
    }

    pub fn preferred(
        symbol: Symbol,
        last_dividend: f64,
        fixed_dividend: f64,
        par_value: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(
            symbol,
            StockType::Preferred,
            last_dividend,
            Some(fixed_dividend),
            par_value,
        )
    }

    /// Seed a reference price before any trade has been recorded.
    pub fn with_last_price(mut self, price: f64) -> Result<Self, ValidationError> {
        self.last_price = Some(checks::positive("last_price", price)?);
        Ok(self)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn kind(&self) -> StockKind {
        self.kind
    }

    pub fn stock_type(&self) -> StockType {
        self.kind.stock_type()
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn fixed_dividend(&self) -> Option<f64> {
        self.kind.fixed_dividend()
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    /// Dividend per share that feeds the yield formula for this variant.
    pub fn dividend_per_share(&self) -> f64 {
        match self.kind {
            StockKind::Common => self.last_dividend,
            StockKind::Preferred { fixed_dividend } => fixed_dividend * self.par_value,
        }
    }

    pub fn dividend_yield(&self, price: f64) -> Result<f64, MarketError> {
        self.dividend_yield_at(Some(price))
    }

    /// Dividend yield at `price`, or at `last_price` when `None`.
    pub fn dividend_yield_at(&self, price: Option<f64>) -> Result<f64, MarketError> {
        let price = self.resolve_price(price)?;
        Ok(self.dividend_per_share() / price)
    }

    pub fn pe_ratio(&self, price: f64) -> Result<f64, MarketError> {
        self.pe_ratio_at(Some(price))
    }

    /// Price over last dividend, at `price` or at `last_price` when `None`.
    ///
    /// A zero dividend makes the ratio undefined whatever the price, so it is
    /// reported before any price problem.
    pub fn pe_ratio_at(&self, price: Option<f64>) -> Result<f64, MarketError> {
        if self.last_dividend == 0.0 {
            return Err(MarketError::UndefinedRatio {
                symbol: self.symbol.clone(),
            });
        }
        let price = self.resolve_price(price)?;
        Ok(price / self.last_dividend)
    }

    pub(crate) fn set_last_price(&mut self, price: f64) {
        self.last_price = Some(price);
    }

    fn resolve_price(&self, price: Option<f64>) -> Result<f64, MarketError> {
        match price.or(self.last_price) {
            Some(price) if price.is_finite() && price > 0.0 => Ok(price),
            Some(price) => Err(MarketError::invalid_price(&self.symbol, price)),
            None => Err(MarketError::unresolved_price(&self.symbol)),
        }
    }
}
