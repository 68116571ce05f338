//! European FX option under Garman–Kohlhagen.

use fc_core::{ensure, unsupported, MarketInput, PricingContext, Real, Result};
use fc_time::Date;

use crate::black_scholes::{black_scholes_merton, BlackScholesResult, OptionType};
use crate::greeks::BumpGreeks;
use crate::instrument::{Instrument, Priceable};
use crate::market::FxMarket;

/// A European option on one unit of foreign currency, paid in domestic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxVanillaOption {
    option_type: OptionType,
    strike: Real,
    expiry: Date,
}

impl FxVanillaOption {
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

    /// Call or put on the foreign currency.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike, domestic per foreign.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Closed form with the foreign rate as the carry yield.
    pub fn analytic(&self, market: &FxMarket) -> Result<BlackScholesResult> {
        black_scholes_merton(
            self.option_type,
            self.effective_input(market, MarketInput::FxSpot)?,
            self.strike,
            self.effective_input(market, MarketInput::InterestRate)?,
            market.foreign_rate,
            self.effective_input(market, MarketInput::Volatility)?,
            market.time_to(self.expiry),
        )
    }
}

impl Instrument for FxVanillaOption {
    fn maturity_date(&self) -> Date {
        self.expiry
    }
}

impl Priceable for FxVanillaOption {
    type Market = FxMarket;

    fn price(&self, market: &FxMarket) -> Result<Real> {
        Ok(self.analytic(market)?.price)
    }
}

impl BumpGreeks for FxVanillaOption {
    fn spot_input(&self) -> MarketInput {
        MarketInput::FxSpot
    }

    fn effective_input(&self, market: &FxMarket, input: MarketInput) -> Result<Real> {
        let explicit = match input {
            MarketInput::FxSpot => market.spot,
            MarketInput::Volatility => market.volatility,
            MarketInput::InterestRate => market.domestic_rate,
            other => unsupported!("FX options do not consume {other}"),
        };
        Ok(PricingContext::value_or(input, explicit))
    }

    fn carry_inputs(&self) -> &'static [MarketInput] {
        &[MarketInput::InterestRate]
    }
}
