//! Batch pricing on the rayon pool.
//!
//! Overrides live on a per-thread stack, so worker threads start with an
//! empty view. Dispatch captures the caller's flattened view and each task
//! re-enters it before pricing.

use fc_core::{PricingContext, Real, Result};
use rayon::prelude::*;

use crate::greeks::{BumpGreeks, Greeks};
use crate::instrument::{MarketState, Priceable};

/// Price every item against `market` in parallel, under the caller's
/// active overrides. Results keep the input order.
pub fn par_price<I>(items: &[I], market: &I::Market) -> Vec<Result<Real>>
where
    I: Priceable + Sync,
    I::Market: Sync,
{
    let view = PricingContext::snapshot();
    tracing::debug!(items = items.len(), overrides = ?view, "parallel pricing");
    items
        .par_iter()
        .map(|item| PricingContext::scoped(view, || item.price(market)))
        .collect()
}

/// Bump-and-reprice Greeks for every item in parallel, under the caller's
/// active overrides.
pub fn par_greeks<I>(items: &[I], market: &I::Market) -> Vec<Result<Greeks>>
where
    I: BumpGreeks + Sync,
    I::Market: MarketState + Sync,
{
    let view = PricingContext::snapshot();
    items
        .par_iter()
        .map(|item| PricingContext::scoped(view, || item.greeks(market)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::black_scholes::OptionType;
    use crate::equity_option::EquityVanillaOption;
    use crate::market::EquityMarket;
    use fc_core::{MarketInput, Overrides};
    use fc_time::Date;

    #[test]
    fn workers_see_the_callers_overrides() {
        let v = Date::from_ymd(2020, 1, 2).unwrap();
        let market = EquityMarket::new(v, 100.0, 0.01, 0.0, 0.2).unwrap();
        let expiry = Date::from_ymd(2021, 1, 4).unwrap();
        let options: Vec<EquityVanillaOption> = (80..120)
            .map(|k| EquityVanillaOption::new(OptionType::Call, k as Real, expiry).unwrap())
            .collect();

        let bumped = Overrides::new().with(MarketInput::Volatility, 0.3);
        let parallel = PricingContext::scoped(bumped, || par_price(&options, &market));
        let serial: Vec<Real> = PricingContext::scoped(bumped, || {
            options.iter().map(|o| o.price(&market).unwrap()).collect()
        });
        for (p, s) in parallel.into_iter().zip(serial) {
            assert_eq!(p.unwrap(), s);
        }
        assert_eq!(PricingContext::depth(), 0);
    }
}
