//! European equity option under Black–Scholes–Merton.

use fc_core::{ensure, unsupported, MarketInput, PricingContext, Real, Result, Time, Volatility};
use fc_time::Date;

use crate::black_scholes::{black_scholes_merton, implied_volatility, BlackScholesResult, OptionType};
use crate::greeks::BumpGreeks;
use crate::instrument::{Instrument, Priceable, PricingResults};
use crate::market::EquityMarket;

/// A European call or put on a dividend-paying stock.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityVanillaOption {
    option_type: OptionType,
    strike: Real,
    expiry: Date,
}

impl EquityVanillaOption {
    /// # Errors
    /// `BadInput` for a non-positive or non-finite strike.
    pub fn new(option_type: OptionType, strike: Real, expiry: Date) -> Result<Self> {
        ensure!(strike.is_finite() && strike > 0.0, "strike must be positive, got {strike}");
        Ok(Self {
            option_type,
            strike,
            expiry,
        })
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Closed-form price and sensitivities at the effective inputs.
    pub fn analytic(&self, market: &EquityMarket) -> Result<BlackScholesResult> {
        let v = |input| self.effective_input(market, input);
        black_scholes_merton(
            self.option_type,
            v(MarketInput::StockPrice)?,
            self.strike,
            v(MarketInput::InterestRate)?,
            v(MarketInput::DividendYield)?,
            v(MarketInput::Volatility)?,
            self.time_to_expiry(market),
        )
    }

    /// ACT/365F time from valuation to expiry.
    pub fn time_to_expiry(&self, market: &EquityMarket) -> Time {
        market.time_to(self.expiry)
    }

    /// Volatility that reproduces `price` at the other effective inputs.
    pub fn implied_volatility(&self, market: &EquityMarket, price: Real) -> Result<Volatility> {
        let v = |input| self.effective_input(market, input);
        implied_volatility(
            self.option_type,
            price,
            v(MarketInput::StockPrice)?,
            self.strike,
            v(MarketInput::InterestRate)?,
            v(MarketInput::DividendYield)?,
            self.time_to_expiry(market),
            1e-12,
        )
    }

    /// Price with the analytic Greeks as named results.
    pub fn results(&self, market: &EquityMarket) -> Result<PricingResults> {
        let r = self.analytic(market)?;
        Ok(PricingResults::from_npv(r.price)
            .with_result("delta", r.delta)
            .with_result("gamma", r.gamma)
            .with_result("vega", r.vega)
            .with_result("theta", r.theta)
            .with_result("rho", r.rho)
            .with_result("rho_q", r.rho_q))
    }
}

impl Instrument for EquityVanillaOption {
    fn maturity_date(&self) -> Date {
        self.expiry
    }
}

impl Priceable for EquityVanillaOption {
    type Market = EquityMarket;

    fn price(&self, market: &EquityMarket) -> Result<Real> {
        Ok(self.analytic(market)?.price)
    }
}

impl BumpGreeks for EquityVanillaOption {
    fn spot_input(&self) -> MarketInput {
        MarketInput::StockPrice
    }

    fn effective_input(&self, market: &EquityMarket, input: MarketInput) -> Result<Real> {
        let explicit = match input {
            MarketInput::StockPrice => market.spot,
            MarketInput::Volatility => market.volatility,
            MarketInput::InterestRate => market.rate,
            MarketInput::DividendYield => market.dividend_yield,
            other => unsupported!("equity options do not consume {other}"),
        };
        Ok(PricingContext::value_or(input, explicit))
    }
}
