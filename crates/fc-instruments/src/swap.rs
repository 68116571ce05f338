//! Fixed-for-floating IBOR swap priced on a single curve.

use fc_core::{ensure, unsupported, Rate, Real, Result};
use fc_termstructures::{CalibrationInstrument, DiscountCurve};
use fc_time::{
    BusinessDayConvention, CalendarType, Date, DayCountType, Frequency, Schedule, ScheduleBuilder,
};

use crate::instrument::{Instrument, Priceable, PricingResults};
use crate::market::RatesMarket;

/// Market conventions for a vanilla swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapConvention {
    /// Fixed-leg payment frequency.
    pub fixed_frequency: Frequency,
    /// Fixed-leg accrual.
    pub fixed_day_count: DayCountType,
    /// Floating-leg payment frequency.
    pub float_frequency: Frequency,
    /// Floating-leg accrual.
    pub float_day_count: DayCountType,
    /// Holiday calendar for both legs.
    pub calendar: CalendarType,
    /// Roll convention for both legs.
    pub convention: BusinessDayConvention,
}

impl SwapConvention {
    /// USD: semi-annual 30E/360 fixed against quarterly ACT/360 LIBOR.
    pub const USD: SwapConvention = SwapConvention {
        fixed_frequency: Frequency::Semiannual,
        fixed_day_count: DayCountType::Thirty360E,
        float_frequency: Frequency::Quarterly,
        float_day_count: DayCountType::Act360,
        calendar: CalendarType::UnitedStates,
        convention: BusinessDayConvention::ModifiedFollowing,
    };

    /// EUR: annual 30/360 fixed against semi-annual ACT/360 EURIBOR.
    pub const EUR: SwapConvention = SwapConvention {
        fixed_frequency: Frequency::Annual,
        fixed_day_count: DayCountType::Thirty360Bond,
        float_frequency: Frequency::Semiannual,
        float_day_count: DayCountType::Act360,
        calendar: CalendarType::Target,
        convention: BusinessDayConvention::ModifiedFollowing,
    };

    /// GBP: semi-annual ACT/365F on both legs.
    pub const GBP: SwapConvention = SwapConvention {
        fixed_frequency: Frequency::Semiannual,
        fixed_day_count: DayCountType::Act365F,
        float_frequency: Frequency::Semiannual,
        float_day_count: DayCountType::Act365F,
        calendar: CalendarType::UnitedKingdom,
        convention: BusinessDayConvention::ModifiedFollowing,
    };

    /// Look up a convention by currency code.
    ///
    /// # Errors
    /// `Unsupported` for currencies without a built-in convention.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => unsupported!("no swap convention for currency '{other}'"),
        }
    }
}

/// A vanilla IBOR swap. The payer pays fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct IborSwap {
    fixed_rate: Rate,
    notional: Real,
    payer: bool,
    convention: SwapConvention,
    fixed_schedule: Schedule,
    float_schedule: Schedule,
}

impl IborSwap {
    /// A swap from `effective` to `maturity`.
    ///
    /// # Errors
    /// `BadInput` for inverted dates, a non-finite rate, a zero notional or
    /// an ACT/ACT ICMA leg day count.
    pub fn new(
        effective: Date,
        maturity: Date,
        fixed_rate: Rate,
        convention: SwapConvention,
        notional: Real,
        payer: bool,
    ) -> Result<Self> {
        ensure!(fixed_rate.is_finite(), "swap rate must be finite");
        convention.fixed_day_count.ensure_standalone()?;
        convention.float_day_count.ensure_standalone()?;
        ensure!(
            notional.is_finite() && notional != 0.0,
            "swap notional must be finite and non-zero"
        );
        let leg = |frequency: Frequency| {
            ScheduleBuilder::new(effective, maturity, frequency, &convention.calendar)
                .with_convention(convention.convention)
                .build()
        };
        let fixed_schedule = leg(convention.fixed_frequency)?;
        let float_schedule = leg(convention.float_frequency)?;
        Ok(Self {
            fixed_rate,
            notional,
            payer,
            convention,
            fixed_schedule,
            float_schedule,
        })
    }

    /// A swap running `tenor` from `effective`.
    pub fn from_tenor(
        effective: Date,
        tenor: &str,
        fixed_rate: Rate,
        convention: SwapConvention,
        notional: Real,
        payer: bool,
    ) -> Result<Self> {
        Self::new(effective, effective.add_tenor(tenor)?, fixed_rate, convention, notional, payer)
    }

    /// A swap quoted in a named currency's convention.
    pub fn from_convention(
        currency: &str,
        effective: Date,
        tenor: &str,
        fixed_rate: Rate,
        notional: Real,
        payer: bool,
    ) -> Result<Self> {
        Self::from_tenor(
            effective,
            tenor,
            fixed_rate,
            SwapConvention::from_name(currency)?,
            notional,
            payer,
        )
    }

    /// Contract fixed rate.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_rate
    }

    /// Whether this side pays fixed.
    pub fn is_payer(&self) -> bool {
        self.payer
    }

    /// Leg conventions.
    pub fn convention(&self) -> &SwapConvention {
        &self.convention
    }

    /// Fixed-leg payment schedule.
    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed_schedule
    }

    /// Floating-leg payment schedule.
    pub fn float_schedule(&self) -> &Schedule {
        &self.float_schedule
    }

    /// `Σ α_k D(t_k)` over the fixed leg.
    pub fn annuity(&self, curve: &dyn DiscountCurve) -> Real {
        let dc = self.convention.fixed_day_count;
        self.fixed_schedule
            .periods()
            .map(|(s, e)| dc.year_fraction(s, e) * curve.df(e))
            .sum()
    }

    /// Unsigned PV of the fixed coupons.
    pub fn fixed_leg_pv(&self, curve: &dyn DiscountCurve) -> Real {
        self.notional * self.fixed_rate * self.annuity(curve)
    }

    /// Unsigned PV of the projected floating coupons.
    pub fn float_leg_pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        let dc = self.convention.float_day_count;
        let mut pv = 0.0;
        for (s, e) in self.float_schedule.periods() {
            pv += curve.fwd_rate(s, e, dc)? * dc.year_fraction(s, e) * curve.df(e);
        }
        Ok(self.notional * pv)
    }

    /// Signed PV: `float − fixed` for the payer.
    pub fn npv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        let sign = if self.payer { 1.0 } else { -1.0 };
        Ok(sign * (self.float_leg_pv(curve)? - self.fixed_leg_pv(curve)))
    }

    /// Value of one basis point on the fixed leg.
    pub fn pv01(&self, curve: &dyn DiscountCurve) -> Real {
        self.notional * self.annuity(curve) * 1e-4
    }

    /// Fixed rate that makes the swap worthless on `curve`.
    pub fn par_rate(&self, curve: &dyn DiscountCurve) -> Result<Rate> {
        let annuity = self.annuity(curve);
        ensure!(annuity > 0.0, "swap has no annuity");
        Ok(self.float_leg_pv(curve)? / (self.notional * annuity))
    }

    /// PV with leg values, PV01 and par rate.
    pub fn results(&self, market: &RatesMarket) -> Result<PricingResults> {
        let curve = market.effective_curve()?;
        let curve = curve.as_ref();
        Ok(PricingResults::from_npv(self.npv(curve)?)
            .with_result("fixed_leg", self.fixed_leg_pv(curve))
            .with_result("float_leg", self.float_leg_pv(curve)?)
            .with_result("pv01", self.pv01(curve))
            .with_result("par_rate", self.par_rate(curve)?))
    }
}

impl Instrument for IborSwap {
    fn maturity_date(&self) -> Date {
        self.fixed_schedule.end_date().max(self.float_schedule.end_date())
    }
}

impl Priceable for IborSwap {
    type Market = RatesMarket;

    fn price(&self, market: &RatesMarket) -> Result<Real> {
        self.npv(market.effective_curve()?.as_ref())
    }
}

impl CalibrationInstrument for IborSwap {
    fn maturity_date(&self) -> Date {
        Instrument::maturity_date(self)
    }

    fn market_quote(&self) -> Real {
        self.fixed_rate
    }

    fn notional(&self) -> Real {
        self.notional
    }

    /// Receiver-fixed PV, zero when the curve reprices the quote.
    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        Ok(self.fixed_leg_pv(curve) - self.float_leg_pv(curve)?)
    }

    fn describe(&self) -> String {
        format!(
            "Swap {:?}..{:?} @ {:.4}%",
            self.fixed_schedule.start_date(),
            Instrument::maturity_date(self),
            self.fixed_rate * 100.0
        )
    }
}
