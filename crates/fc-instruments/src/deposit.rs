//! Money-market deposit.

use fc_core::{ensure, DiscountFactor, Rate, Real, Result};
use fc_termstructures::{CalibrationInstrument, DiscountCurve};
use fc_time::{BusinessDayConvention, Calendar, Date, DayCountType};

use crate::instrument::{Instrument, Priceable, PricingResults};
use crate::market::RatesMarket;

/// A simple-interest loan from `start` to `maturity`, seen from the
/// lender: pay `N` at start, receive `N·(1 + rα)` at maturity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deposit {
    start: Date,
    maturity: Date,
    rate: Rate,
    day_count: DayCountType,
    notional: Real,
}

impl Deposit {
    /// A deposit over explicit dates.
    ///
    /// # Errors
    /// `BadInput` unless `start < maturity` and rate and notional are
    /// finite with a non-zero notional.
    pub fn new(
        start: Date,
        maturity: Date,
        rate: Rate,
        day_count: DayCountType,
        notional: Real,
    ) -> Result<Self> {
        ensure!(start < maturity, "deposit start {start:?} must precede maturity {maturity:?}");
        ensure!(rate.is_finite(), "deposit rate must be finite");
        day_count.ensure_standalone()?;
        ensure!(
            notional.is_finite() && notional != 0.0,
            "deposit notional must be finite and non-zero"
        );
        Ok(Self {
            start,
            maturity,
            rate,
            day_count,
            notional,
        })
    }

    /// A deposit running `tenor` from `start`, maturity adjusted
    /// modified-following on `calendar`.
    pub fn from_tenor(
        start: Date,
        tenor: &str,
        rate: Rate,
        day_count: DayCountType,
        calendar: &dyn Calendar,
        notional: Real,
    ) -> Result<Self> {
        let maturity = calendar.adjust(
            start.add_tenor(tenor)?,
            BusinessDayConvention::ModifiedFollowing,
        );
        Self::new(start, maturity, rate, day_count, notional)
    }

    /// Start date.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Quoted simple rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Accrual day count.
    pub fn day_count(&self) -> DayCountType {
        self.day_count
    }

    /// Accrual fraction of the deposit period.
    pub fn accrual(&self) -> Real {
        self.day_count.year_fraction(self.start, self.maturity)
    }

    /// PV on `curve`: `N·(−D(s) + (1 + rα)·D(e))`.
    pub fn npv(&self, curve: &dyn DiscountCurve) -> Real {
        let growth = 1.0 + self.rate * self.accrual();
        self.notional * (growth * curve.df(self.maturity) - curve.df(self.start))
    }

    /// Simple rate implied by `curve` over the deposit period.
    pub fn implied_rate(&self, curve: &dyn DiscountCurve) -> Result<Rate> {
        curve.fwd_rate(self.start, self.maturity, self.day_count)
    }

    /// PV plus the curve-implied rate.
    pub fn results(&self, market: &RatesMarket) -> Result<PricingResults> {
        let curve = market.effective_curve()?;
        Ok(PricingResults::from_npv(self.npv(curve.as_ref()))
            .with_result("implied_rate", self.implied_rate(curve.as_ref())?))
    }
}

impl Instrument for Deposit {
    fn maturity_date(&self) -> Date {
        self.maturity
    }
}

impl Priceable for Deposit {
    type Market = RatesMarket;

    fn price(&self, market: &RatesMarket) -> Result<Real> {
        Ok(self.npv(market.effective_curve()?.as_ref()))
    }
}

impl CalibrationInstrument for Deposit {
    fn maturity_date(&self) -> Date {
        self.maturity
    }

    fn market_quote(&self) -> Real {
        self.rate
    }

    fn notional(&self) -> Real {
        self.notional
    }

    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        Ok(self.npv(curve))
    }

    fn describe(&self) -> String {
        format!(
            "Deposit {:?}..{:?} @ {:.4}%",
            self.start,
            self.maturity,
            self.rate * 100.0
        )
    }

    fn implied_pillar_df(&self, curve: &dyn DiscountCurve, last_pillar: Date) -> Option<DiscountFactor> {
        (self.start <= last_pillar).then(|| curve.df(self.start) / (1.0 + self.rate * self.accrual()))
    }
}
