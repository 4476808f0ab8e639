//! Aggregations shared by [`Market`](crate::Market) and
//! [`SharedMarket`](crate::SharedMarket).

use crate::Trade;

/// `Σ(price·quantity) / Σ(quantity)`, or `None` when there are no trades.
pub fn volume_weighted_price<'a, I>(trades: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let (notional, volume) = trades
        .into_iter()
        .fold((0.0_f64, 0_u128), |(notional, volume), trade| {
            (notional + trade.notional(), volume + u128::from(trade.quantity()))
        });

    if volume == 0 {
        return None;
    }
    Some(notional / volume as f64)
}

/// Geometric mean computed as `exp(mean(ln p))`, or `None` for no prices.
///
/// The running sum stays in the log domain, so long products of large or
/// tiny prices never overflow. Prices must be positive.
pub fn geometric_mean<I>(prices: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (log_sum, count) = prices
        .into_iter()
        .fold((0.0_f64, 0_usize), |(log_sum, count), price| {
            (log_sum + price.ln(), count + 1)
        });

    if count == 0 {
        return None;
    }
    Some((log_sum / count as f64).exp())
}
