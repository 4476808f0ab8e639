//! Reference listings of the Global Beverage Corporation Exchange.

use crate::{Stock, Symbol, ValidationError};

/// TEA, POP, ALE, GIN and JOE, in that order.
pub fn gbce_stocks() -> Result<Vec<Stock>, ValidationError> {
    Ok(vec![
        Stock::common(Symbol::parse("TEA")?, 0.0, 100.0)?,
        Stock::common(Symbol::parse("POP")?, 8.0, 100.0)?,
        Stock::common(Symbol::parse("ALE")?, 23.0, 60.0)?,
        Stock::preferred(Symbol::parse("GIN")?, 8.0, 0.02, 100.0)?,
        Stock::common(Symbol::parse("JOE")?, 13.0, 250.0)?,
    ])
}
