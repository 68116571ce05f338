//! Market snapshots consumed by the pricers.
//!
//! Each market carries explicit data. Pricers resolve the inputs they
//! consume through [`PricingContext::value_or`], so an active override
//! replaces the explicit value for the duration of its scope.

use std::sync::Arc;

use fc_core::{ensure, MarketInput, PricingContext, Rate, Real, Result, Time, Volatility};
use fc_termstructures::{DiscountCurve, FlatCurve, TermStructure};
use fc_time::{Date, DayCountType};

use crate::instrument::MarketState;

/// A transient flat continuous ACT/365F curve at `valuation` when the
/// context overrides `interest_rate`.
pub(crate) fn overridden_rate_curve(valuation: Date) -> Result<Option<Arc<dyn DiscountCurve>>> {
    match PricingContext::lookup(MarketInput::InterestRate) {
        Some(r) => Ok(Some(Arc::new(FlatCurve::continuous(valuation, r)?))),
        None => Ok(None),
    }
}

// ── Rates ─────────────────────────────────────────────────────────────────────

/// A single discount curve.
#[derive(Debug, Clone)]
pub struct RatesMarket {
    curve: Arc<dyn DiscountCurve>,
}

impl RatesMarket {
    /// Wrap a discount curve.
    pub fn new(curve: Arc<dyn DiscountCurve>) -> Self {
        Self { curve }
    }

    /// The explicit curve.
    pub fn curve(&self) -> &Arc<dyn DiscountCurve> {
        &self.curve
    }

    /// The explicit curve, or a flat curve at an overridden
    /// `interest_rate`.
    pub fn effective_curve(&self) -> Result<Arc<dyn DiscountCurve>> {
        Ok(overridden_rate_curve(self.valuation_date())?.unwrap_or_else(|| Arc::clone(&self.curve)))
    }

    /// The curve's valuation date.
    pub fn valuation_date(&self) -> Date {
        self.curve.valuation_date()
    }
}

// ── Equity ────────────────────────────────────────────────────────────────────

/// Flat Black–Scholes inputs for an equity underlying.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquityMarket {
    /// Valuation date.
    pub valuation: Date,
    /// Spot price.
    pub spot: Real,
    /// Continuous risk-free rate.
    pub rate: Rate,
    /// Continuous dividend yield.
    pub dividend_yield: Rate,
    /// Black–Scholes volatility.
    pub volatility: Volatility,
}

impl EquityMarket {
    /// A market snapshot.
    ///
    /// # Errors
    /// `BadInput` for a non-positive spot, a negative volatility or
    /// non-finite inputs.
    pub fn new(
        valuation: Date,
        spot: Real,
        rate: Rate,
        dividend_yield: Rate,
        volatility: Volatility,
    ) -> Result<Self> {
        ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
        ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative, got {volatility}"
        );
        ensure!(
            rate.is_finite() && dividend_yield.is_finite(),
            "rates must be finite"
        );
        Ok(Self {
            valuation,
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// ACT/365F time from valuation to `date`.
    pub fn time_to(&self, date: Date) -> Time {
        DayCountType::Act365F.year_fraction(self.valuation, date)
    }
}

impl MarketState for EquityMarket {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn with_valuation_date(&self, date: Date) -> Result<Self> {
        Ok(Self {
            valuation: date,
            ..*self
        })
    }
}

// ── FX ────────────────────────────────────────────────────────────────────────

/// Flat Garman–Kohlhagen inputs for a currency pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxMarket {
    /// Valuation date.
    pub valuation: Date,
    /// Spot, domestic units per foreign unit.
    pub spot: Real,
    /// Continuous domestic rate.
    pub domestic_rate: Rate,
    /// Continuous foreign rate.
    pub foreign_rate: Rate,
    /// Black–Scholes volatility.
    pub volatility: Volatility,
}

impl FxMarket {
    /// A market snapshot.
    ///
    /// # Errors
    /// `BadInput` for a non-positive spot, a negative volatility or
    /// non-finite inputs.
    pub fn new(
        valuation: Date,
        spot: Real,
        domestic_rate: Rate,
        foreign_rate: Rate,
        volatility: Volatility,
    ) -> Result<Self> {
        ensure!(spot.is_finite() && spot > 0.0, "FX spot must be positive, got {spot}");
        ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be non-negative, got {volatility}"
        );
        ensure!(
            domestic_rate.is_finite() && foreign_rate.is_finite(),
            "rates must be finite"
        );
        Ok(Self {
            valuation,
            spot,
            domestic_rate,
            foreign_rate,
            volatility,
        })
    }

    /// ACT/365F time from valuation to `date`.
    pub fn time_to(&self, date: Date) -> Time {
        DayCountType::Act365F.year_fraction(self.valuation, date)
    }
}

impl MarketState for FxMarket {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn with_valuation_date(&self, date: Date) -> Result<Self> {
        Ok(Self {
            valuation: date,
            ..*self
        })
    }
}
