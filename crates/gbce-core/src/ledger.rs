//! Append-only trade history, one timestamp-ordered list per symbol.

use std::collections::HashMap;

use crate::{Symbol, Trade, TradeIndicator, UtcDateTime, ValidationError};

/// Per-symbol trade store.
///
/// Trades for a symbol are kept in non-decreasing timestamp order. An
/// in-order append is a plain push; a late trade is inserted after any
/// trades sharing its timestamp. Nothing is ever mutated or removed.
#[derive(Debug, Clone, Default)]
pub struct TradeLedger {
    trades: HashMap<Symbol, Vec<Trade>>,
    total: usize,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a trade. Whether `symbol` is listed is the
    /// caller's concern.
    pub fn record(
        &mut self,
        symbol: Symbol,
        quantity: u64,
        indicator: TradeIndicator,
        price: f64,
        timestamp: UtcDateTime,
    ) -> Result<&Trade, ValidationError> {
        let trade = Trade::new(symbol, timestamp, quantity, indicator, price)?;
        Ok(self.append(trade))
    }

    /// Append an already validated trade.
    pub fn append(&mut self, trade: Trade) -> &Trade {
        let history = self.trades.entry(trade.symbol().clone()).or_default();
        let position = match history.last() {
            Some(last) if last.timestamp() > trade.timestamp() => {
                history.partition_point(|existing| existing.timestamp() <= trade.timestamp())
            }
            _ => history.len(),
        };
        history.insert(position, trade);
        self.total += 1;
        &history[position]
    }

    /// Trades for `symbol` with `timestamp >= cutoff`, oldest first. Unknown
    /// symbols and empty windows both yield an empty iterator.
    pub fn trades_since(&self, symbol: &str, cutoff: UtcDateTime) -> std::slice::Iter<'_, Trade> {
        let history = self.history(symbol);
        let start = history.partition_point(|trade| trade.timestamp() < cutoff);
        history[start..].iter()
    }

    /// Full history for `symbol`, oldest first.
    pub fn trades(&self, symbol: &str) -> std::slice::Iter<'_, Trade> {
        self.history(symbol).iter()
    }

    /// Most recent trade by timestamp.
    pub fn last_trade(&self, symbol: &str) -> Option<&Trade> {
        self.history(symbol).last()
    }

    pub fn has_trades(&self, symbol: &str) -> bool {
        !self.history(symbol).is_empty()
    }

    /// Number of trades across all symbols.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn history(&self, symbol: &str) -> &[Trade] {
        self.trades.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }
}
