use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::checks;
use crate::{Symbol, UtcDateTime, ValidationError};

/// Side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeIndicator {
    Buy,
    Sell,
}

impl TradeIndicator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl Display for TradeIndicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeIndicator {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" | "b" => Ok(Self::Buy),
            "sell" | "s" => Ok(Self::Sell),
            other => Err(ValidationError::InvalidIndicator {
                value: other.to_owned(),
            }),
        }
    }
}

/// One executed transaction. The stock is referenced by symbol only and
/// resolved through the catalog when needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    symbol: Symbol,
    timestamp: UtcDateTime,
    quantity: u64,
    indicator: TradeIndicator,
    price: f64,
}

impl Trade {
    pub fn new(
        symbol: Symbol,
        timestamp: UtcDateTime,
        quantity: u64,
        indicator: TradeIndicator,
        price: f64,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }

        Ok(Self {
            symbol,
            timestamp,
            quantity,
            indicator,
            price: checks::positive("price", price)?,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn timestamp(&self) -> UtcDateTime {
        self.timestamp
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn indicator(&self) -> TradeIndicator {
        self.indicator
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// `price * quantity`, the trade's contribution to a VWSP numerator.
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
