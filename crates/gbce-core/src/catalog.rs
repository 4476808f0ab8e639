//! Registry of listed stocks keyed by symbol.

use std::collections::HashMap;

use crate::{MarketError, Stock, Symbol};

/// Symbol → [`Stock`] registry that preserves registration order.
#[derive(Debug, Clone, Default)]
pub struct StockCatalog {
    stocks: Vec<Stock>,
    index: HashMap<Symbol, usize>,
}

impl StockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stock. A symbol that is already present is rejected and the
    /// catalog is left untouched.
    pub fn register(&mut self, stock: Stock) -> Result<(), MarketError> {
        if self.index.contains_key(stock.symbol()) {
            return Err(MarketError::DuplicateStock {
                symbol: stock.symbol().clone(),
            });
        }

        self.push_unique(stock);
        Ok(())
    }

    /// Append a stock whose symbol the caller already holds unique, such as
    /// one copied out of another registry.
    pub(crate) fn push_unique(&mut self, stock: Stock) {
        debug_assert!(!self.index.contains_key(stock.symbol()));
        self.index.insert(stock.symbol().clone(), self.stocks.len());
        self.stocks.push(stock);
    }

    /// Resolve a symbol. Input is normalized the same way [`Symbol::parse`]
    /// does, so `"tea"` finds `TEA`.
    pub fn lookup(&self, symbol: &str) -> Result<&Stock, MarketError> {
        let position = self.position(symbol)?;
        Ok(&self.stocks[position])
    }

    pub(crate) fn lookup_mut(&mut self, symbol: &str) -> Result<&mut Stock, MarketError> {
        let position = self.position(symbol)?;
        Ok(&mut self.stocks[position])
    }

    /// All stocks in registration order. Call again (or clone the iterator)
    /// to walk the catalog a second time.
    pub fn all(&self) -> std::slice::Iter<'_, Stock> {
        self.stocks.iter()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.position(symbol).is_ok()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    fn position(&self, symbol: &str) -> Result<usize, MarketError> {
        position_in(&self.index, symbol)
    }
}

/// Resolve caller text against a symbol index. Text that does not parse as a
/// ticker cannot be listed, so it is unknown rather than invalid.
pub(crate) fn position_in(
    index: &HashMap<Symbol, usize>,
    symbol: &str,
) -> Result<usize, MarketError> {
    if let Some(&position) = index.get(symbol) {
        return Ok(position);
    }

    match Symbol::parse(symbol) {
        Ok(parsed) => index
            .get(&parsed)
            .copied()
            .ok_or_else(|| MarketError::unknown_stock(parsed.as_str())),
        Err(_) => Err(MarketError::unknown_stock(symbol.trim())),
    }
}
