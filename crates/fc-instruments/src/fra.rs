//! Forward rate agreement on a single curve.

use fc_core::{ensure, DiscountFactor, Rate, Real, Result};
use fc_termstructures::{CalibrationInstrument, DiscountCurve};
use fc_time::{BusinessDayConvention, Calendar, Date, DayCountType};

use crate::instrument::{Instrument, Priceable, PricingResults};
use crate::market::RatesMarket;

/// An FRA paying `α·(F − K)` at the end of the period. The payer receives
/// the floating rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fra {
    start: Date,
    end: Date,
    fixed_rate: Rate,
    day_count: DayCountType,
    notional: Real,
    payer: bool,
}

impl Fra {
    /// An FRA over explicit dates.
    ///
    /// # Errors
    /// `BadInput` unless `start < end` with finite rate and non-zero
    /// notional.
    pub fn new(
        start: Date,
        end: Date,
        fixed_rate: Rate,
        day_count: DayCountType,
        notional: Real,
        payer: bool,
    ) -> Result<Self> {
        ensure!(start < end, "FRA start {start:?} must precede end {end:?}");
        ensure!(fixed_rate.is_finite(), "FRA rate must be finite");
        day_count.ensure_standalone()?;
        ensure!(
            notional.is_finite() && notional != 0.0,
            "FRA notional must be finite and non-zero"
        );
        Ok(Self {
            start,
            end,
            fixed_rate,
            day_count,
            notional,
            payer,
        })
    }

    /// A `<start>x<end>` FRA in months from `spot`, dates adjusted
    /// modified-following on `calendar`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_months(
        spot: Date,
        start_months: i32,
        end_months: i32,
        fixed_rate: Rate,
        day_count: DayCountType,
        calendar: &dyn Calendar,
        notional: Real,
        payer: bool,
    ) -> Result<Self> {
        let conv = BusinessDayConvention::ModifiedFollowing;
        let start = calendar.adjust(spot.add_months(start_months)?, conv);
        let end = calendar.adjust(spot.add_months(end_months)?, conv);
        Self::new(start, end, fixed_rate, day_count, notional, payer)
    }

    /// Start of the forward period.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Contract rate.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_rate
    }

    /// Whether this side receives the floating rate.
    pub fn is_payer(&self) -> bool {
        self.payer
    }

    /// Accrual fraction of the forward period.
    pub fn accrual(&self) -> Real {
        self.day_count.year_fraction(self.start, self.end)
    }

    /// Single-curve forward over the period.
    pub fn forward_rate(&self, curve: &dyn DiscountCurve) -> Result<Rate> {
        curve.fwd_rate(self.start, self.end, self.day_count)
    }

    /// PV on `curve`; payer: `N·(D(s) − D(e)·(1 + Kα))`.
    pub fn npv(&self, curve: &dyn DiscountCurve) -> Real {
        let payer_pv = curve.df(self.start) - curve.df(self.end) * (1.0 + self.fixed_rate * self.accrual());
        let sign = if self.payer { 1.0 } else { -1.0 };
        sign * self.notional * payer_pv
    }

    /// PV plus the forward rate.
    pub fn results(&self, market: &RatesMarket) -> Result<PricingResults> {
        let curve = market.effective_curve()?;
        Ok(PricingResults::from_npv(self.npv(curve.as_ref()))
            .with_result("forward_rate", self.forward_rate(curve.as_ref())?))
    }
}

impl Instrument for Fra {
    fn maturity_date(&self) -> Date {
        self.end
    }
}

impl Priceable for Fra {
    type Market = RatesMarket;

    fn price(&self, market: &RatesMarket) -> Result<Real> {
        Ok(self.npv(market.effective_curve()?.as_ref()))
    }
}

impl CalibrationInstrument for Fra {
    fn maturity_date(&self) -> Date {
        self.end
    }

    fn market_quote(&self) -> Real {
        self.fixed_rate
    }

    fn notional(&self) -> Real {
        self.notional
    }

    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        Ok(self.npv(curve))
    }

    fn describe(&self) -> String {
        format!(
            "FRA {:?}..{:?} @ {:.4}%",
            self.start,
            self.end,
            self.fixed_rate * 100.0
        )
    }

    fn implied_pillar_df(&self, curve: &dyn DiscountCurve, last_pillar: Date) -> Option<DiscountFactor> {
        (self.start <= last_pillar)
            .then(|| curve.df(self.start) / (1.0 + self.fixed_rate * self.accrual()))
    }
}
