//! `DiscountCurve`: discount factors, zero rates and forwards.
//!
//! Implementors provide [`df_time`](DiscountCurve::df_time) and, when they
//! have one, an analytic instantaneous forward. Everything else (date
//! queries, vector queries, zero rates, simple forwards and par swap rates)
//! is derived from those two hooks.

use std::sync::Arc;

use fc_core::{ensure, Compounding, DiscountFactor, Rate, Real, Result, Spread, Time};
use fc_time::{CalendarType, Date, DayCountType, Frequency, InterestRate, ScheduleBuilder, Tenor};

use crate::term_structure::TermStructure;
use crate::zero_spreaded_curve::ZeroSpreadedCurve;

/// Step, in years, of the numerical forward used when a curve has no
/// analytic one. Also the horizon of the short-end rate at the valuation
/// date.
pub const FORWARD_STEP: Time = 1.0 / 365.0;

/// A discount curve.
///
/// Object safe: instruments hold curves as `&dyn DiscountCurve` or
/// `Arc<dyn DiscountCurve>`.
pub trait DiscountCurve: TermStructure {
    // ── Hooks ────────────────────────────────────────────────────────────

    /// Discount factor at time `t` (in this curve's day count).
    fn df_time(&self, t: Time) -> DiscountFactor;

    /// Analytic instantaneous forward at `t`, if the curve has one.
    fn instantaneous_forward(&self, _t: Time) -> Option<Rate> {
        None
    }

    // ── Discount factors ─────────────────────────────────────────────────

    /// Discount factor for `date`.
    fn df(&self, date: Date) -> DiscountFactor {
        self.df_time(self.time_from_valuation(date))
    }

    /// Discount factors for several dates.
    fn df_dates(&self, dates: &[Date]) -> Vec<DiscountFactor> {
        dates.iter().map(|&d| self.df(d)).collect()
    }

    /// Fill `out[k]` with the discount factor for `dates[k]`.
    ///
    /// # Errors
    /// `BadInput` if the slices differ in length.
    fn df_into(&self, dates: &[Date], out: &mut [DiscountFactor]) -> Result<()> {
        ensure!(
            dates.len() == out.len(),
            "output buffer holds {} values for {} dates",
            out.len(),
            dates.len()
        );
        for (o, &d) in out.iter_mut().zip(dates) {
            *o = self.df(d);
        }
        Ok(())
    }

    /// Discount factors for several times.
    fn dfs_time(&self, times: &[Time]) -> Vec<DiscountFactor> {
        times.iter().map(|&t| self.df_time(t)).collect()
    }

    // ── Rates ────────────────────────────────────────────────────────────

    /// Zero rate to `date` in this curve's day count.
    fn zero_rate(
        &self,
        date: Date,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<InterestRate> {
        self.zero_rate_with(date, compounding, frequency, self.day_count())
    }

    /// Zero rate to `date` measured in `day_count`.
    ///
    /// At the valuation date this is the short-end rate over
    /// [`FORWARD_STEP`].
    ///
    /// # Errors
    /// `BadInput` for dates before the valuation date or invalid
    /// conventions.
    fn zero_rate_with(
        &self,
        date: Date,
        compounding: Compounding,
        frequency: Frequency,
        day_count: DayCountType,
    ) -> Result<InterestRate> {
        day_count.ensure_standalone()?;
        let t = day_count.year_fraction(self.valuation_date(), date);
        ensure!(
            t >= 0.0,
            "zero rate requested for {date:?} before valuation {:?}",
            self.valuation_date()
        );
        let (t, df) = if t > 0.0 {
            (t, self.df(date))
        } else {
            (FORWARD_STEP, self.df_time(FORWARD_STEP))
        };
        InterestRate::implied_rate(1.0 / df, day_count, compounding, frequency, t)
    }

    /// Instantaneous forward at `date`: analytic when available, otherwise
    /// `(ln D(t) − ln D(t + h)) / h` with `h` = [`FORWARD_STEP`].
    fn fwd(&self, date: Date) -> Rate {
        let t = self.time_from_valuation(date);
        self.instantaneous_forward(t).unwrap_or_else(|| {
            (self.df_time(t).ln() - self.df_time(t + FORWARD_STEP).ln()) / FORWARD_STEP
        })
    }

    /// Simple forward rate from `start` to `end` accruing in `day_count`.
    fn fwd_rate(&self, start: Date, end: Date, day_count: DayCountType) -> Result<Rate> {
        day_count.ensure_standalone()?;
        let alpha = day_count.year_fraction(start, end);
        ensure!(
            alpha > 0.0,
            "forward period {start:?} to {end:?} has non-positive accrual {alpha}"
        );
        Ok((self.df(start) / self.df(end) - 1.0) / alpha)
    }

    /// Simple forward rate over `tenor` starting at `start`.
    fn fwd_rate_tenor(&self, start: Date, tenor: Tenor, day_count: DayCountType) -> Result<Rate> {
        self.fwd_rate(start, start.add_period(tenor)?, day_count)
    }

    /// Par rate of a fixed leg paying at `frequency` from `effective` to
    /// `maturity` (weekend calendar, following, backward generation).
    ///
    /// `(D(start) − D(end)) / Σ α_k D(t_k)`.
    fn swap_rate(
        &self,
        effective: Date,
        maturity: Date,
        frequency: Frequency,
        day_count: DayCountType,
    ) -> Result<Rate> {
        day_count.ensure_standalone()?;
        let schedule =
            ScheduleBuilder::new(effective, maturity, frequency, &CalendarType::Weekend).build()?;
        let annuity: Real = schedule
            .periods()
            .map(|(s, e)| day_count.year_fraction(s, e) * self.df(e))
            .sum();
        ensure!(annuity > 0.0, "swap from {effective:?} to {maturity:?} has no annuity");
        Ok((self.df(schedule.start_date()) - self.df(schedule.end_date())) / annuity)
    }
}

impl<T: DiscountCurve + ?Sized> DiscountCurve for Arc<T> {
    fn df_time(&self, t: Time) -> DiscountFactor {
        (**self).df_time(t)
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        (**self).instantaneous_forward(t)
    }
}

/// Parallel shifts of a curve.
pub trait BumpCurve {
    /// A copy of this curve shifted by a continuous zero spread:
    /// `D'(t) = D(t)·exp(−spread·t)`.
    fn bump(&self, spread: Spread) -> ZeroSpreadedCurve;
}

impl<T: DiscountCurve + Clone + 'static> BumpCurve for T {
    fn bump(&self, spread: Spread) -> ZeroSpreadedCurve {
        ZeroSpreadedCurve::new(Arc::new(self.clone()), spread)
    }
}
