//! The exchange itself: a catalog, a ledger, and every derived metric.

use time::Duration;
use tracing::{debug, warn};

use crate::config::validate_window;
use crate::report::{MarketReport, StockReport};
use crate::{
    pricing, sample, MarketConfig, MarketError, Stock, StockCatalog, Trade, TradeIndicator,
    TradeLedger, UtcDateTime,
};

/// Global Beverage Corporation Exchange.
///
/// Owns exactly one [`StockCatalog`] and one [`TradeLedger`]. Recording a
/// trade is the only operation that changes state after registration; it
/// needs `&mut self`, so the ledger append and the `last_price` update are
/// never observed apart. Wrap the market in a
/// [`SharedMarket`](crate::SharedMarket) to share it between threads.
#[derive(Debug, Clone, Default)]
pub struct Market {
    config: MarketConfig,
    catalog: StockCatalog,
    ledger: TradeLedger,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MarketConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A market preloaded with the GBCE listings from [`sample::gbce_stocks`].
    pub fn with_sample_stocks() -> Result<Self, MarketError> {
        let mut market = Self::new();
        for stock in sample::gbce_stocks()? {
            market.register_stock(stock)?;
        }
        Ok(market)
    }

    pub(crate) fn from_parts(
        config: MarketConfig,
        catalog: StockCatalog,
        ledger: TradeLedger,
    ) -> Self {
        Self {
            config,
            catalog,
            ledger,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StockCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    pub fn register_stock(&mut self, stock: Stock) -> Result<(), MarketError> {
        let symbol = stock.symbol().clone();
        let stock_type = stock.stock_type();
        match self.catalog.register(stock) {
            Ok(()) => {
                debug!(%symbol, %stock_type, "registered stock");
                Ok(())
            }
            Err(error) => {
                warn!(%symbol, %error, "stock registration rejected");
                Err(error)
            }
        }
    }

    pub fn stock(&self, symbol: &str) -> Result<&Stock, MarketError> {
        self.catalog.lookup(symbol)
    }

    /// Registered stocks in registration order.
    pub fn stocks(&self) -> std::slice::Iter<'_, Stock> {
        self.catalog.all()
    }

    /// Append a trade and move the stock's `last_price` to its price.
    ///
    /// `timestamp` defaults to now. Unknown symbols and invalid trades fail
    /// before anything is written.
    pub fn record_trade(
        &mut self,
        symbol: &str,
        quantity: u64,
        indicator: TradeIndicator,
        price: f64,
        timestamp: Option<UtcDateTime>,
    ) -> Result<&Trade, MarketError> {
        let stock = match self.catalog.lookup_mut(symbol) {
            Ok(stock) => stock,
            Err(error) => {
                warn!(symbol, %error, "trade rejected");
                return Err(error);
            }
        };

        let timestamp = timestamp.unwrap_or_else(UtcDateTime::now);
        let trade = self
            .ledger
            .record(stock.symbol().clone(), quantity, indicator, price, timestamp)?;
        stock.set_last_price(trade.price());

        debug!(
            symbol = %trade.symbol(),
            quantity,
            %indicator,
            price,
            %timestamp,
            "recorded trade"
        );
        Ok(trade)
    }

    /// Trades for a listed symbol at or after `cutoff`, oldest first.
    pub fn trades_since(
        &self,
        symbol: &str,
        cutoff: UtcDateTime,
    ) -> Result<std::slice::Iter<'_, Trade>, MarketError> {
        let stock = self.catalog.lookup(symbol)?;
        Ok(self.ledger.trades_since(stock.symbol().as_str(), cutoff))
    }

    /// Dividend yield at `price`, or at the last traded price when `None`.
    pub fn dividend_yield(&self, symbol: &str, price: Option<f64>) -> Result<f64, MarketError> {
        self.catalog.lookup(symbol)?.dividend_yield_at(price)
    }

    /// P/E ratio at `price`, or at the last traded price when `None`.
    pub fn pe_ratio(&self, symbol: &str, price: Option<f64>) -> Result<f64, MarketError> {
        self.catalog.lookup(symbol)?.pe_ratio_at(price)
    }

    pub fn vwsp_default_window(&self) -> Duration {
        self.config.vwsp_window()
    }

    /// Volume weighted stock price over trades stamped at or after
    /// `as_of - window`. Defaults: the configured window and now.
    ///
    /// An empty window is an error; substituting `last_price` is left to
    /// the caller.
    pub fn volume_weighted_stock_price(
        &self,
        symbol: &str,
        window: Option<Duration>,
        as_of: Option<UtcDateTime>,
    ) -> Result<f64, MarketError> {
        let stock = self.catalog.lookup(symbol)?;
        let window = window.unwrap_or(self.config.vwsp_window());
        windowed_vwsp(stock, &self.ledger, window, as_of.unwrap_or_else(UtcDateTime::now))
    }

    /// Geometric mean of `last_price` over every stock that has ever traded.
    ///
    /// The index is the market's instantaneous state, so `as_of` (default
    /// now) only stamps the evaluation; it never filters constituents.
    pub fn all_share_index(&self, as_of: Option<UtcDateTime>) -> Result<f64, MarketError> {
        index_over(
            as_of.unwrap_or_else(UtcDateTime::now),
            self.catalog
                .all()
                .map(|stock| constituent_price(stock, &self.ledger)),
        )
    }

    /// Every metric for every stock, with failures reported per metric.
    pub fn report(&self, as_of: Option<UtcDateTime>) -> MarketReport {
        let as_of = as_of.unwrap_or_else(UtcDateTime::now);
        let window = self.config.vwsp_window();
        let stocks = self
            .catalog
            .all()
            .map(|stock| StockReport {
                symbol: stock.symbol().clone(),
                stock_type: stock.stock_type(),
                last_price: stock.last_price(),
                trade_count: self.ledger.trades(stock.symbol().as_str()).len(),
                dividend_yield: stock.dividend_yield_at(None).into(),
                pe_ratio: stock.pe_ratio_at(None).into(),
                vwsp: windowed_vwsp(stock, &self.ledger, window, as_of).into(),
            })
            .collect();

        MarketReport {
            as_of,
            window_secs: window.whole_seconds(),
            stocks,
            all_share_index: self.all_share_index(Some(as_of)).into(),
        }
    }
}

pub(crate) fn windowed_vwsp(
    stock: &Stock,
    ledger: &TradeLedger,
    window: Duration,
    as_of: UtcDateTime,
) -> Result<f64, MarketError> {
    let window = validate_window(window)?;
    let cutoff = as_of.saturating_sub(window);
    let trades = ledger.trades_since(stock.symbol().as_str(), cutoff);
    let vwsp = pricing::volume_weighted_price(trades).ok_or_else(|| {
        MarketError::NoTradesInWindow {
            symbol: stock.symbol().clone(),
            window_secs: window.whole_seconds(),
        }
    })?;

    debug!(symbol = %stock.symbol(), %cutoff, vwsp, "computed vwsp");
    Ok(vwsp)
}

/// `last_price` of a stock with at least one recorded trade. A price seeded
/// through [`Stock::with_last_price`] alone does not make a constituent.
pub(crate) fn constituent_price(stock: &Stock, ledger: &TradeLedger) -> Option<f64> {
    if ledger.has_trades(stock.symbol().as_str()) {
        stock.last_price()
    } else {
        None
    }
}

pub(crate) fn index_over<I>(as_of: UtcDateTime, prices: I) -> Result<f64, MarketError>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let constituents: Vec<f64> = prices.into_iter().flatten().collect();
    let index = pricing::geometric_mean(constituents.iter().copied())
        .ok_or(MarketError::EmptyMarket)?;

    debug!(%as_of, constituents = constituents.len(), index, "computed all share index");
    Ok(index)
}
