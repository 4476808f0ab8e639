//! Thread-safe market with per-symbol locking.
//!
//! Lock order is registry, then shards in registration order. Writers hold
//! at most one shard lock and never hold the registry lock while taking it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use time::Duration;
use tracing::{debug, warn};

use crate::catalog::position_in;
use crate::market::{constituent_price, index_over, windowed_vwsp};
use crate::{
    Market, MarketConfig, MarketError, Stock, StockCatalog, Symbol, Trade, TradeIndicator,
    TradeLedger, UtcDateTime,
};

/// One listing and its own trade history, guarded together so the ledger
/// append and the `last_price` update are a single step.
#[derive(Debug)]
struct Shard {
    stock: Stock,
    ledger: TradeLedger,
}

#[derive(Debug, Default)]
struct Registry {
    shards: Vec<Arc<Mutex<Shard>>>,
    index: HashMap<Symbol, usize>,
}

/// [`Market`] for concurrent hosts.
///
/// Trades on different symbols proceed in parallel; trades on the same
/// symbol serialize. Reads lock the shards they inspect, so every result
/// reflects trades that were fully recorded.
#[derive(Debug, Default)]
pub struct SharedMarket {
    config: MarketConfig,
    registry: RwLock<Registry>,
}

impl SharedMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MarketConfig) -> Self {
        Self {
            config,
            registry: RwLock::default(),
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn register_stock(&self, stock: Stock) -> Result<(), MarketError> {
        let mut registry = self.registry.write();
        if registry.index.contains_key(stock.symbol()) {
            let error = MarketError::DuplicateStock {
                symbol: stock.symbol().clone(),
            };
            warn!(symbol = %stock.symbol(), %error, "stock registration rejected");
            return Err(error);
        }

        debug!(symbol = %stock.symbol(), stock_type = %stock.stock_type(), "registered stock");
        let position = registry.shards.len();
        registry.index.insert(stock.symbol().clone(), position);
        registry.shards.push(Arc::new(Mutex::new(Shard {
            stock,
            ledger: TradeLedger::new(),
        })));
        Ok(())
    }

    /// Copy of the stock as of the call.
    pub fn stock(&self, symbol: &str) -> Result<Stock, MarketError> {
        Ok(self.shard(symbol)?.lock().stock.clone())
    }

    /// Symbols in registration order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.registry
            .read()
            .shards
            .iter()
            .map(|shard| shard.lock().stock.symbol().clone())
            .collect()
    }

    pub fn record_trade(
        &self,
        symbol: &str,
        quantity: u64,
        indicator: TradeIndicator,
        price: f64,
        timestamp: Option<UtcDateTime>,
    ) -> Result<Trade, MarketError> {
        let shard = self.shard(symbol).inspect_err(|error| {
            warn!(symbol, %error, "trade rejected");
        })?;
        let timestamp = timestamp.unwrap_or_else(UtcDateTime::now);

        let mut guard = shard.lock();
        let Shard { stock, ledger } = &mut *guard;
        let trade = ledger
            .record(stock.symbol().clone(), quantity, indicator, price, timestamp)?
            .clone();
        stock.set_last_price(trade.price());

        debug!(symbol = %trade.symbol(), quantity, %indicator, price, %timestamp, "recorded trade");
        Ok(trade)
    }

    pub fn dividend_yield(&self, symbol: &str, price: Option<f64>) -> Result<f64, MarketError> {
        let shard = self.shard(symbol)?;
        let guard = shard.lock();
        guard.stock.dividend_yield_at(price)
    }

    pub fn pe_ratio(&self, symbol: &str, price: Option<f64>) -> Result<f64, MarketError> {
        let shard = self.shard(symbol)?;
        let guard = shard.lock();
        guard.stock.pe_ratio_at(price)
    }

    pub fn volume_weighted_stock_price(
        &self,
        symbol: &str,
        window: Option<Duration>,
        as_of: Option<UtcDateTime>,
    ) -> Result<f64, MarketError> {
        let shard = self.shard(symbol)?;
        let guard = shard.lock();
        windowed_vwsp(
            &guard.stock,
            &guard.ledger,
            window.unwrap_or(self.config.vwsp_window()),
            as_of.unwrap_or_else(UtcDateTime::now),
        )
    }

    /// Index over a consistent view: every shard stays locked until all
    /// constituent prices have been read.
    pub fn all_share_index(&self, as_of: Option<UtcDateTime>) -> Result<f64, MarketError> {
        let registry = self.registry.read();
        let guards: Vec<_> = registry.shards.iter().map(|shard| shard.lock()).collect();
        index_over(
            as_of.unwrap_or_else(UtcDateTime::now),
            guards
                .iter()
                .map(|shard| constituent_price(&shard.stock, &shard.ledger)),
        )
    }

    /// Owned single-threaded copy of the whole market, taken atomically.
    pub fn snapshot(&self) -> Market {
        let registry = self.registry.read();
        let guards: Vec<_> = registry.shards.iter().map(|shard| shard.lock()).collect();

        let mut catalog = StockCatalog::new();
        let mut ledger = TradeLedger::new();
        for shard in &guards {
            catalog.push_unique(shard.stock.clone());
            for trade in shard.ledger.trades(shard.stock.symbol().as_str()) {
                ledger.append(trade.clone());
            }
        }
        Market::from_parts(self.config, catalog, ledger)
    }

    fn shard(&self, symbol: &str) -> Result<Arc<Mutex<Shard>>, MarketError> {
        let registry = self.registry.read();
        let position = position_in(&registry.index, symbol)?;
        Ok(Arc::clone(&registry.shards[position]))
    }
}

impl From<Market> for SharedMarket {
    fn from(market: Market) -> Self {
        let shared = Self::with_config(*market.config());
        {
            let mut registry = shared.registry.write();
            for stock in market.stocks() {
                let mut ledger = TradeLedger::new();
                for trade in market.ledger().trades(stock.symbol().as_str()) {
                    ledger.append(trade.clone());
                }
                let position = registry.shards.len();
                registry.index.insert(stock.symbol().clone(), position);
                registry.shards.push(Arc::new(Mutex::new(Shard {
                    stock: stock.clone(),
                    ledger,
                })));
            }
        }
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedMarket {
        SharedMarket::from(Market::with_sample_stocks().expect("sample market"))
    }

    #[test]
    fn concurrent_trades_on_one_symbol_are_not_lost() {
        let market = shared();
        std::thread::scope(|scope| {
            for worker in 0..8_u64 {
                let market = &market;
                scope.spawn(move || {
                    for step in 1..=50_u64 {
                        market
                            .record_trade(
                                "ALE",
                                1,
                                TradeIndicator::Buy,
                                (worker * 100 + step) as f64,
                                None,
                            )
                            .expect("trade");
                    }
                });
            }
        });

        let snapshot = market.snapshot();
        assert_eq!(snapshot.ledger().len(), 400);

        let last = market.stock("ALE").expect("stock").last_price().expect("price");
        let recorded: Vec<f64> = snapshot.ledger().trades("ALE").map(Trade::price).collect();
        assert!(recorded.contains(&last));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let market = shared();
        let tea = Stock::common(Symbol::parse("TEA").expect("symbol"), 1.0, 1.0).expect("stock");
        assert!(matches!(
            market.register_stock(tea),
            Err(MarketError::DuplicateStock { .. })
        ));
        assert_eq!(market.symbols().len(), 5);
    }

    #[test]
    fn snapshot_round_trips_state() {
        let market = shared();
        market
            .record_trade("gin", 10, TradeIndicator::Sell, 102.0, None)
            .expect("trade");

        let snapshot = market.snapshot();
        let listed: Vec<&str> = snapshot.stocks().map(|stock| stock.symbol().as_str()).collect();
        assert_eq!(listed, ["TEA", "POP", "ALE", "GIN", "JOE"]);
        assert_eq!(snapshot.catalog().len(), 5);
        assert_eq!(snapshot.stock("GIN").expect("stock").last_price(), Some(102.0));
        assert_eq!(
            snapshot.all_share_index(None).expect("index"),
            market.all_share_index(None).expect("index")
        );
        assert!(matches!(
            market.record_trade("XYZ", 1, TradeIndicator::Buy, 1.0, None),
            Err(MarketError::UnknownStock { .. })
        ));
    }

    #[test]
    fn malformed_symbol_is_unknown_not_invalid() {
        let market = shared();
        for malformed in ["", "9TEA", "ALE$"] {
            assert!(matches!(
                market.record_trade(malformed, 1, TradeIndicator::Buy, 1.0, None),
                Err(MarketError::UnknownStock { .. })
            ));
            assert!(matches!(
                market.pe_ratio(malformed, Some(1.0)),
                Err(MarketError::UnknownStock { .. })
            ));
        }
        assert_eq!(market.snapshot().ledger().len(), 0);
    }
}
