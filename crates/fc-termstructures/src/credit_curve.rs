//! `CreditCurve`: survival probabilities with piecewise-constant hazard.
//!
//! Between pillars `t_{i−1} < t ≤ t_i` the hazard is `h_i` and
//! `Q(t) = Q(t_{i−1})·exp(−h_i·(t − t_{i−1}))`; the last hazard extends
//! beyond the final pillar. The curve carries the discount curve and
//! recovery rate it was built against so that CDS pricers need only one
//! argument.

use std::sync::Arc;

use fc_core::{ensure, numerical_warning, DiscountFactor, Error, Probability, Rate, Real, Result, Time};
use fc_math::solvers1d::{safeguarded_secant, MAX_ITERATIONS};
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

const MIN_HAZARD: Rate = -1.0;
const MAX_HAZARD: Rate = 10.0;

/// An instrument that pins one hazard pillar of a [`CreditCurve`].
pub trait CreditCalibrationInstrument: std::fmt::Debug + Send + Sync {
    /// The pillar date this instrument determines.
    fn maturity_date(&self) -> Date;

    /// The quoted running spread.
    fn market_quote(&self) -> Real;

    /// Notional; repricing tolerances scale with it.
    fn notional(&self) -> Real;

    /// Model PV on `curve`; zero when the curve reprices the quote.
    fn pv(&self, curve: &CreditCurve) -> Result<Real>;

    /// Short human-readable label, used in errors and logs.
    fn describe(&self) -> String;
}

/// Credit-curve calibration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditBootstrapConfig {
    /// Repricing tolerance on `|pv| / notional`.
    pub tolerance: Real,
    /// Solver evaluations per pillar.
    pub max_iterations: u32,
    /// Treat non-positive hazards as failures.
    pub strict: bool,
    /// Day count of the survival curve.
    pub day_count: DayCountType,
}

impl Default for CreditBootstrapConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: MAX_ITERATIONS,
            strict: false,
            day_count: DayCountType::Act365F,
        }
    }
}

impl CreditBootstrapConfig {
    /// Set strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the repricing tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Survival curve over a discount curve and a recovery rate.
#[derive(Debug, Clone)]
pub struct CreditCurve {
    valuation: Date,
    day_count: DayCountType,
    /// Node dates, starting with the valuation date.
    dates: Vec<Date>,
    times: Vec<Time>,
    survival: Vec<Probability>,
    /// `hazards[i]` applies on `(times[i], times[i + 1]]`.
    hazards: Vec<Rate>,
    discount: Arc<dyn DiscountCurve>,
    recovery: Real,
}

impl CreditCurve {
    /// A curve through explicit survival pillars.
    ///
    /// A pillar on the valuation date must carry probability one; otherwise
    /// one is added.
    ///
    /// # Errors
    /// `BadInput` unless the dates are strictly increasing from the
    /// valuation date, the probabilities lie in `(0, 1]` and are
    /// non-increasing, `0 ≤ recovery < 1` and `day_count` needs no
    /// reference period.
    pub fn new(
        valuation: Date,
        dates: &[Date],
        survival: &[Probability],
        discount: Arc<dyn DiscountCurve>,
        recovery: Real,
        day_count: DayCountType,
    ) -> Result<Self> {
        ensure!(
            dates.len() == survival.len(),
            "{} pillar dates but {} survival probabilities",
            dates.len(),
            survival.len()
        );
        ensure!(!dates.is_empty(), "a credit curve needs at least one pillar");
        day_count.ensure_standalone()?;
        ensure!(
            dates[0] >= valuation && dates.windows(2).all(|w| w[0] < w[1]),
            "pillar dates must be strictly increasing from the valuation date"
        );
        let (dates, survival) = if dates[0] == valuation {
            ensure!(
                (survival[0] - 1.0).abs() <= 1e-12,
                "survival at the valuation date must be 1, got {}",
                survival[0]
            );
            ensure!(dates.len() > 1, "a credit curve needs a pillar after valuation");
            (dates.to_vec(), survival.to_vec())
        } else {
            let mut d = vec![valuation];
            d.extend_from_slice(dates);
            let mut q = vec![1.0];
            q.extend_from_slice(survival);
            (d, q)
        };
        ensure!(
            survival.iter().all(|q| q.is_finite() && *q > 0.0 && *q <= 1.0),
            "survival probabilities must lie in (0, 1]"
        );
        ensure!(
            survival.windows(2).all(|w| w[1] <= w[0]),
            "survival probabilities must be non-increasing"
        );
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| day_count.year_fraction(valuation, d))
            .collect();
        let hazards = times
            .windows(2)
            .zip(survival.windows(2))
            .map(|(t, q)| (q[0] / q[1]).ln() / (t[1] - t[0]))
            .collect();
        Self::assemble(valuation, day_count, dates, times, survival, hazards, discount, recovery)
    }

    /// A curve from hazards on `(t_{i−1}, t_i]`; hazards may be negative.
    fn from_hazards(
        valuation: Date,
        day_count: DayCountType,
        pillars: &[Date],
        pillar_times: &[Time],
        hazards: &[Rate],
        discount: Arc<dyn DiscountCurve>,
        recovery: Real,
    ) -> Result<Self> {
        let mut dates = Vec::with_capacity(pillars.len() + 1);
        dates.push(valuation);
        dates.extend_from_slice(pillars);
        let mut times = Vec::with_capacity(pillar_times.len() + 1);
        times.push(0.0);
        times.extend_from_slice(pillar_times);
        let mut survival = Vec::with_capacity(times.len());
        survival.push(1.0);
        for (i, &h) in hazards.iter().enumerate() {
            let q = survival[i] * (-h * (times[i + 1] - times[i])).exp();
            survival.push(q);
        }
        Self::assemble(
            valuation,
            day_count,
            dates,
            times,
            survival,
            hazards.to_vec(),
            discount,
            recovery,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        valuation: Date,
        day_count: DayCountType,
        dates: Vec<Date>,
        times: Vec<Time>,
        survival: Vec<Probability>,
        hazards: Vec<Rate>,
        discount: Arc<dyn DiscountCurve>,
        recovery: Real,
    ) -> Result<Self> {
        ensure!(
            (0.0..1.0).contains(&recovery),
            "recovery rate must lie in [0, 1), got {recovery}"
        );
        ensure!(
            times.windows(2).all(|w| w[0] < w[1]),
            "pillar times collapse under {day_count:?}"
        );
        ensure!(
            hazards.iter().all(|h| h.is_finite()),
            "hazard rates must be finite"
        );
        Ok(Self {
            valuation,
            day_count,
            dates,
            times,
            survival,
            hazards,
            discount,
            recovery,
        })
    }

    /// Calibrate hazard pillars, in maturity order, so that every
    /// instrument has zero PV.
    ///
    /// # Errors
    /// * `BadInput` for an empty strip, unordered maturities, an invalid
    ///   recovery rate or an ACT/ACT ICMA day count.
    /// * `CalibrationFailure` naming the instrument when a hazard cannot be
    ///   solved, when strict mode meets a non-positive hazard, or when an
    ///   instrument misses its quote by more than `tolerance · notional`.
    pub fn calibrate(
        valuation: Date,
        instruments: &[&dyn CreditCalibrationInstrument],
        discount: Arc<dyn DiscountCurve>,
        recovery: Real,
        config: &CreditBootstrapConfig,
    ) -> Result<Self> {
        ensure!(!instruments.is_empty(), "no credit calibration instruments");
        config.day_count.ensure_standalone()?;
        ensure!(
            (0.0..1.0).contains(&recovery),
            "recovery rate must lie in [0, 1), got {recovery}"
        );
        let dates: Vec<Date> = instruments.iter().map(|i| i.maturity_date()).collect();
        ensure!(
            dates[0] > valuation && dates.windows(2).all(|w| w[0] < w[1]),
            "credit instruments must have strictly increasing maturities after valuation"
        );
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| config.day_count.year_fraction(valuation, d))
            .collect();

        let mut hazards: Vec<Rate> = Vec::with_capacity(instruments.len());
        for (k, inst) in instruments.iter().enumerate() {
            let label = inst.describe();
            let notional = inst.notional();
            ensure!(
                notional.is_finite() && notional != 0.0,
                "{label}: notional must be finite and non-zero"
            );
            let guess = match hazards.last() {
                Some(&h) => h,
                None => inst.market_quote() / (1.0 - recovery),
            };
            let mut trial = hazards.clone();
            trial.push(guess);
            let h = safeguarded_secant(
                |h| {
                    trial[k] = h;
                    let curve = Self::from_hazards(
                        valuation,
                        config.day_count,
                        &dates[..=k],
                        &times[..=k],
                        &trial,
                        Arc::clone(&discount),
                        recovery,
                    )?;
                    Ok(inst.pv(&curve)? / notional)
                },
                guess.clamp(MIN_HAZARD, MAX_HAZARD),
                MIN_HAZARD,
                MAX_HAZARD,
                config.tolerance,
                config.max_iterations,
            )
            .map_err(|e| e.into_calibration_failure(label.clone()))?;

            if h <= 0.0 {
                if config.strict {
                    return Err(Error::CalibrationFailure {
                        instrument: label,
                        residual: h,
                        reason: "non-positive hazard rate".into(),
                    });
                }
                numerical_warning!(instrument = %label, hazard = h, "non-positive hazard rate");
            }
            tracing::debug!(instrument = %label, maturity = ?dates[k], hazard = h, "hazard solved");
            hazards.push(h);
        }

        let curve = Self::from_hazards(
            valuation,
            config.day_count,
            &dates,
            &times,
            &hazards,
            discount,
            recovery,
        )?;
        for inst in instruments {
            let residual = (inst.pv(&curve)? / inst.notional()).abs();
            if residual.is_nan() || residual > config.tolerance {
                return Err(Error::CalibrationFailure {
                    instrument: inst.describe(),
                    residual,
                    reason: "does not reprice on the calibrated curve".into(),
                });
            }
        }
        tracing::info!(pillars = hazards.len(), recovery, "credit curve calibrated");
        Ok(curve)
    }

    fn segment(&self, t: Time) -> usize {
        self.times[1..]
            .partition_point(|&ti| ti < t)
            .min(self.hazards.len() - 1)
    }

    /// Survival probability to time `t`; one for `t ≤ 0`.
    pub fn survival_prob_time(&self, t: Time) -> Probability {
        if t <= 0.0 {
            return 1.0;
        }
        let i = self.segment(t);
        self.survival[i] * (-self.hazards[i] * (t - self.times[i])).exp()
    }

    /// Survival probability to `date`.
    pub fn survival_prob(&self, date: Date) -> Probability {
        self.survival_prob_time(self.time_from_valuation(date))
    }

    /// Survival probabilities to several dates.
    pub fn survival_probs(&self, dates: &[Date]) -> Vec<Probability> {
        dates.iter().map(|&d| self.survival_prob(d)).collect()
    }

    /// Hazard rate in force at time `t`.
    pub fn hazard_rate(&self, t: Time) -> Rate {
        self.hazards[self.segment(t)]
    }

    /// Discount factor for `date` from the underlying discount curve.
    pub fn df(&self, date: Date) -> DiscountFactor {
        self.discount.df(date)
    }

    /// Discount factors for several dates.
    pub fn dfs(&self, dates: &[Date]) -> Vec<DiscountFactor> {
        self.discount.df_dates(dates)
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> Real {
        self.recovery
    }

    /// The discount curve.
    pub fn discount_curve(&self) -> &Arc<dyn DiscountCurve> {
        &self.discount
    }

    /// Node dates, starting with the valuation date.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Node times, starting with 0.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Node survival probabilities, starting with 1.
    pub fn survival(&self) -> &[Probability] {
        &self.survival
    }

    /// Hazard on each node interval.
    pub fn hazards(&self) -> &[Rate] {
        &self.hazards
    }
}

impl TermStructure for CreditCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}
