//! Sequential discount-curve bootstrap.
//!
//! Instruments are taken in maturity order; each one contributes a single
//! pillar at its maturity date whose discount factor is solved holding the
//! earlier pillars fixed. Deposits and FRAs starting inside the solved part
//! of the curve have a closed-form pillar. Everything else goes through the
//! safeguarded secant solver on `pv / notional`.
//!
//! Non-local interpolation kinds (cubic and PCHIP) couple every pillar to
//! its neighbours, so for those the sweep is repeated with all current
//! pillars in place until every instrument reprices.

use fc_core::{ensure, numerical_warning, DiscountFactor, Error, Real, Result, Time};
use fc_math::solvers1d::{safeguarded_secant, MAX_ITERATIONS};
use fc_math::InterpKind;
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::flat_curve::FlatCurve;
use crate::interpolated_discount_curve::InterpolatedDiscountCurve;

const MIN_PILLAR_DF: DiscountFactor = 1e-8;
const MAX_PILLAR_DF: DiscountFactor = 10.0;

/// An instrument that can pin one pillar of a discount curve.
pub trait CalibrationInstrument: std::fmt::Debug + Send + Sync {
    /// The date of the pillar this instrument determines.
    fn maturity_date(&self) -> Date;

    /// The market quote (rate) the instrument is built from.
    fn market_quote(&self) -> Real;

    /// Notional; repricing tolerances scale with it.
    fn notional(&self) -> Real;

    /// Model PV on `curve`; zero when the curve reprices the quote.
    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real>;

    /// Short human-readable label, used in errors and logs.
    fn describe(&self) -> String;

    /// Closed-form pillar discount factor, when the instrument depends on
    /// the curve only up to `last_pillar` plus its own maturity.
    fn implied_pillar_df(
        &self,
        _curve: &dyn DiscountCurve,
        _last_pillar: Date,
    ) -> Option<DiscountFactor> {
        None
    }
}

/// Bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Repricing tolerance on `|pv| / notional`.
    pub tolerance: Real,
    /// Solver evaluations per pillar.
    pub max_iterations: u32,
    /// Treat negative implied forwards as failures.
    pub strict: bool,
    /// Interpolation of the resulting curve.
    pub interpolation: InterpKind,
    /// Sweeps allowed for non-local interpolation kinds.
    pub max_sweeps: u32,
    /// Day count of the resulting curve.
    pub day_count: DayCountType,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: MAX_ITERATIONS,
            strict: false,
            interpolation: InterpKind::FlatFwdRates,
            max_sweeps: 20,
            day_count: DayCountType::Act365F,
        }
    }
}

impl BootstrapConfig {
    /// Set the interpolation kind.
    #[must_use]
    pub fn with_interpolation(mut self, kind: InterpKind) -> Self {
        self.interpolation = kind;
        self
    }

    /// Set the repricing tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the curve day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountType) -> Self {
        self.day_count = day_count;
        self
    }

    /// Set the per-pillar evaluation cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Calibrate an [`InterpolatedDiscountCurve`] whose pillars are the
/// instruments' maturities.
///
/// # Errors
/// * `BadInput` for an empty strip, maturities that are not strictly
///   increasing after `valuation`, or invalid settings (including an
///   ACT/ACT ICMA curve day count).
/// * `CalibrationFailure` naming the instrument when a pillar cannot be
///   solved, when strict mode meets a negative forward, or when the final
///   curve misses a quote by more than `tolerance · notional`.
pub fn bootstrap_discount_curve(
    valuation: Date,
    instruments: &[&dyn CalibrationInstrument],
    config: &BootstrapConfig,
) -> Result<InterpolatedDiscountCurve> {
    ensure!(!instruments.is_empty(), "no calibration instruments");
    ensure!(
        config.tolerance > 0.0 && config.max_iterations > 0 && config.max_sweeps > 0,
        "invalid bootstrap settings {config:?}"
    );
    config.day_count.ensure_standalone()?;
    let dates: Vec<Date> = instruments.iter().map(|i| i.maturity_date()).collect();
    ensure!(
        dates[0] > valuation,
        "first maturity {:?} is not after valuation {valuation:?}",
        dates[0]
    );
    ensure!(
        dates.windows(2).all(|w| w[0] < w[1]),
        "calibration instruments must have strictly increasing maturities"
    );
    let times: Vec<Time> = dates
        .iter()
        .map(|&d| config.day_count.year_fraction(valuation, d))
        .collect();
    ensure!(
        times[0] > 0.0 && times.windows(2).all(|w| w[0] < w[1]),
        "maturities collapse under {:?}",
        config.day_count
    );

    let local = config.interpolation.is_local();
    let mut dfs: Vec<DiscountFactor> = Vec::with_capacity(instruments.len());
    let mut sweeps = 0;

    loop {
        for (k, inst) in instruments.iter().enumerate() {
            let first_sweep = sweeps == 0;
            let df = solve_pillar(valuation, &dates, &times, &dfs, k, *inst, first_sweep, config)
                .map_err(|e| e.into_calibration_failure(inst.describe()))?;
            if first_sweep {
                dfs.push(df);
            } else {
                dfs[k] = df;
            }
            tracing::debug!(
                instrument = %inst.describe(),
                maturity = ?dates[k],
                df,
                sweep = sweeps,
                "pillar solved"
            );
        }
        sweeps += 1;
        if local {
            break;
        }
        let curve = build(valuation, &dates, &dfs, config)?;
        let worst = worst_residual(&curve, instruments)?;
        if worst.1 <= config.tolerance || sweeps >= config.max_sweeps {
            break;
        }
        tracing::debug!(sweep = sweeps, residual = worst.1, "repeating bootstrap sweep");
    }

    for k in 0..dfs.len() {
        let previous = if k == 0 { 1.0 } else { dfs[k - 1] };
        if dfs[k] > previous {
            let inst = instruments[k];
            if config.strict {
                return Err(Error::CalibrationFailure {
                    instrument: inst.describe(),
                    residual: dfs[k] - previous,
                    reason: "negative implied forward".into(),
                });
            }
            numerical_warning!(
                instrument = %inst.describe(),
                df = dfs[k],
                previous,
                "negative implied forward"
            );
        }
    }

    let curve = build(valuation, &dates, &dfs, config)?;
    let (worst, residual) = worst_residual(&curve, instruments)?;
    if residual > config.tolerance {
        return Err(Error::CalibrationFailure {
            instrument: instruments[worst].describe(),
            residual,
            reason: format!("does not reprice after {sweeps} sweep(s)"),
        });
    }
    tracing::info!(
        pillars = dfs.len(),
        sweeps,
        interpolation = %config.interpolation,
        "discount curve bootstrapped"
    );
    Ok(curve)
}

fn build(
    valuation: Date,
    dates: &[Date],
    dfs: &[DiscountFactor],
    config: &BootstrapConfig,
) -> Result<InterpolatedDiscountCurve> {
    InterpolatedDiscountCurve::new(
        valuation,
        dates,
        dfs,
        config.interpolation,
        config.day_count,
    )
}

/// Index and size of the largest `|pv| / notional`.
fn worst_residual(
    curve: &dyn DiscountCurve,
    instruments: &[&dyn CalibrationInstrument],
) -> Result<(usize, Real)> {
    let mut worst = (0, 0.0);
    for (k, inst) in instruments.iter().enumerate() {
        let residual = (inst.pv(curve)? / inst.notional()).abs();
        if residual.is_nan() || residual > worst.1 {
            worst = (k, residual);
        }
    }
    Ok(worst)
}

/// Solve the discount factor of pillar `k`.
///
/// On the first sweep `dfs` holds the pillars before `k`; on later sweeps it
/// holds every pillar and only `dfs[k]` moves.
#[allow(clippy::too_many_arguments)]
fn solve_pillar(
    valuation: Date,
    dates: &[Date],
    times: &[Time],
    dfs: &[DiscountFactor],
    k: usize,
    inst: &dyn CalibrationInstrument,
    first_sweep: bool,
    config: &BootstrapConfig,
) -> Result<DiscountFactor> {
    let notional = inst.notional();
    ensure!(
        notional.is_finite() && notional != 0.0,
        "notional must be finite and non-zero, got {notional}"
    );

    if first_sweep {
        let last_pillar = if k == 0 { valuation } else { dates[k - 1] };
        let closed_form = if k == 0 {
            let flat = FlatCurve::continuous(valuation, 0.0)?;
            inst.implied_pillar_df(&flat, last_pillar)
        } else {
            let partial = build(valuation, &dates[..k], &dfs[..k], config)?;
            inst.implied_pillar_df(&partial, last_pillar)
        };
        if let Some(df) = closed_form.filter(|df| df.is_finite() && *df > 0.0) {
            return Ok(df);
        }
    }

    let guess = if first_sweep {
        initial_guess(inst, times, dfs, k)
    } else {
        dfs[k]
    };
    let pillars = if first_sweep { k + 1 } else { dfs.len() };
    let mut trial = dfs[..pillars.min(dfs.len())].to_vec();
    if trial.len() == k {
        trial.push(guess);
    }

    safeguarded_secant(
        |df| {
            trial[k] = df;
            let curve = build(valuation, &dates[..pillars], &trial, config)?;
            Ok(inst.pv(&curve)? / notional)
        },
        guess.clamp(MIN_PILLAR_DF, MAX_PILLAR_DF),
        MIN_PILLAR_DF,
        MAX_PILLAR_DF,
        config.tolerance * 1e-2,
        config.max_iterations,
    )
}

/// Extend the previous pillar's forward, or use the quote as a continuous
/// rate for the first pillar.
fn initial_guess(
    inst: &dyn CalibrationInstrument,
    times: &[Time],
    dfs: &[DiscountFactor],
    k: usize,
) -> DiscountFactor {
    let forward = match k {
        0 => inst.market_quote(),
        1 => -dfs[0].ln() / times[0],
        _ => (dfs[k - 2] / dfs[k - 1]).ln() / (times[k - 1] - times[k - 2]),
    };
    let forward = if forward.is_finite() { forward } else { 0.0 };
    let (t_prev, df_prev) = if k == 0 {
        (0.0, 1.0)
    } else {
        (times[k - 1], dfs[k - 1])
    };
    df_prev * (-forward * (times[k] - t_prev)).exp()
}
