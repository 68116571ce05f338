//! Nelson–Siegel and Nelson–Siegel–Svensson parametric curves.
//!
//! Both model the continuously compounded zero rate. With `x = t/λ`:
//!
//! ```text
//! r(t) = β0 + β1·(1 − e^−x)/x + β2·((1 − e^−x)/x − e^−x)          (NS)
//!      + β3·((1 − e^−y)/y − e^−y),  y = t/λ2                     (NSS)
//! ```
//!
//! and the instantaneous forward is `β0 + β1·e^−x + β2·x·e^−x (+ β3·y·e^−y)`.

use fc_core::{ensure, DiscountFactor, Rate, Real, Result, Time};
use fc_math::LinearLeastSquares;
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// `(1 − e^−x)/x`, with its series near zero.
fn slope_loading(x: Real) -> Real {
    if x.abs() < 1e-8 {
        1.0 - 0.5 * x
    } else {
        -(-x).exp_m1() / x
    }
}

/// `(1 − e^−x)/x − e^−x`.
fn hump_loading(x: Real) -> Real {
    slope_loading(x) - (-x).exp()
}

fn check_decay(lambda: Real, name: &str) -> Result<()> {
    ensure!(
        lambda.is_finite() && lambda > 0.0,
        "{name} must be positive and finite, got {lambda}"
    );
    Ok(())
}

type Basis = Box<dyn Fn(Real) -> Real>;

// ── Nelson–Siegel ─────────────────────────────────────────────────────────────

/// Nelson–Siegel curve.
#[derive(Debug, Clone, PartialEq)]
pub struct NelsonSiegelCurve {
    valuation: Date,
    day_count: DayCountType,
    beta0: Real,
    beta1: Real,
    beta2: Real,
    lambda: Real,
}

impl NelsonSiegelCurve {
    /// Decay parameters scanned by [`fit`](Self::fit): `0.05·1.1^k`, k = 0..=67.
    pub fn lambda_grid() -> impl Iterator<Item = Real> {
        (0..=67).map(|k| 0.05 * 1.1_f64.powi(k))
    }

    /// A curve with level `beta0`, slope `beta1`, curvature `beta2` and
    /// decay `lambda` (in years).
    ///
    /// # Errors
    /// `BadInput` unless `lambda` is positive and all parameters are finite.
    pub fn new(
        valuation: Date,
        beta0: Real,
        beta1: Real,
        beta2: Real,
        lambda: Real,
        day_count: DayCountType,
    ) -> Result<Self> {
        check_decay(lambda, "lambda")?;
        day_count.ensure_standalone()?;
        ensure!(
            beta0.is_finite() && beta1.is_finite() && beta2.is_finite(),
            "Nelson-Siegel betas must be finite"
        );
        Ok(Self {
            valuation,
            day_count,
            beta0,
            beta1,
            beta2,
            lambda,
        })
    }

    /// Fit to `(time, zero rate)` observations with `lambda` held fixed.
    pub fn fit_with_lambda(
        valuation: Date,
        day_count: DayCountType,
        times: &[Time],
        zeros: &[Rate],
        lambda: Real,
    ) -> Result<Self> {
        let ls = Self::regress(times, zeros, lambda)?;
        let b = ls.coefficients();
        Self::new(valuation, b[0], b[1], b[2], lambda, day_count)
    }

    /// Fit to `(time, zero rate)` observations, choosing the decay from
    /// [`lambda_grid`](Self::lambda_grid) with the lowest residual.
    ///
    /// # Errors
    /// `BadInput` for fewer than three observations or non-finite data.
    pub fn fit(
        valuation: Date,
        day_count: DayCountType,
        times: &[Time],
        zeros: &[Rate],
    ) -> Result<Self> {
        let mut best: Option<(Real, Real)> = None;
        for lambda in Self::lambda_grid() {
            let rss = Self::regress(times, zeros, lambda)?.residual_sum_of_squares();
            if best.map_or(true, |(_, r)| rss < r) {
                best = Some((lambda, rss));
            }
        }
        match best {
            Some((lambda, _)) => Self::fit_with_lambda(valuation, day_count, times, zeros, lambda),
            None => fc_core::fail!("empty decay grid"),
        }
    }

    fn regress(times: &[Time], zeros: &[Rate], lambda: Real) -> Result<LinearLeastSquares> {
        ensure!(
            times.iter().all(|t| t.is_finite() && *t >= 0.0),
            "observation times must be finite and non-negative"
        );
        let basis: [Basis; 3] = [
            Box::new(|_: Real| 1.0),
            Box::new(move |t: Real| slope_loading(t / lambda)),
            Box::new(move |t: Real| hump_loading(t / lambda)),
        ];
        LinearLeastSquares::fit(times, zeros, &basis)
    }

    /// `[β0, β1, β2]`.
    pub fn betas(&self) -> [Real; 3] {
        [self.beta0, self.beta1, self.beta2]
    }

    /// Decay parameter.
    pub fn lambda(&self) -> Real {
        self.lambda
    }

    /// Continuously compounded zero rate at `t`.
    pub fn zero_rate_time(&self, t: Time) -> Rate {
        let x = t / self.lambda;
        self.beta0 + self.beta1 * slope_loading(x) + self.beta2 * hump_loading(x)
    }
}

impl TermStructure for NelsonSiegelCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}

impl DiscountCurve for NelsonSiegelCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        (-self.zero_rate_time(t) * t).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        let x = t / self.lambda;
        let e = (-x).exp();
        Some(self.beta0 + self.beta1 * e + self.beta2 * x * e)
    }
}

// ── Nelson–Siegel–Svensson ────────────────────────────────────────────────────

/// Nelson–Siegel–Svensson curve: Nelson–Siegel plus a second hump.
#[derive(Debug, Clone, PartialEq)]
pub struct NelsonSiegelSvenssonCurve {
    ns: NelsonSiegelCurve,
    beta3: Real,
    lambda2: Real,
}

impl NelsonSiegelSvenssonCurve {
    /// A curve with the Nelson–Siegel parameters plus `beta3` on a hump with
    /// decay `lambda2`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        valuation: Date,
        beta0: Real,
        beta1: Real,
        beta2: Real,
        beta3: Real,
        lambda1: Real,
        lambda2: Real,
        day_count: DayCountType,
    ) -> Result<Self> {
        check_decay(lambda2, "lambda2")?;
        ensure!(beta3.is_finite(), "beta3 must be finite, got {beta3}");
        Ok(Self {
            ns: NelsonSiegelCurve::new(valuation, beta0, beta1, beta2, lambda1, day_count)?,
            beta3,
            lambda2,
        })
    }

    /// `[β0, β1, β2, β3]`.
    pub fn betas(&self) -> [Real; 4] {
        let [b0, b1, b2] = self.ns.betas();
        [b0, b1, b2, self.beta3]
    }

    /// `(λ1, λ2)`.
    pub fn lambdas(&self) -> (Real, Real) {
        (self.ns.lambda, self.lambda2)
    }

    /// Continuously compounded zero rate at `t`.
    pub fn zero_rate_time(&self, t: Time) -> Rate {
        self.ns.zero_rate_time(t) + self.beta3 * hump_loading(t / self.lambda2)
    }
}

impl TermStructure for NelsonSiegelSvenssonCurve {
    fn valuation_date(&self) -> Date {
        self.ns.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.ns.day_count
    }
}

impl DiscountCurve for NelsonSiegelSvenssonCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        (-self.zero_rate_time(t) * t).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        let y = t / self.lambda2;
        let hump = self.beta3 * y * (-y).exp();
        self.ns.instantaneous_forward(t).map(|f| f + hump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fc_core::Compounding;
    use fc_time::Frequency;

    fn valuation() -> Date {
        Date::from_ymd(2022, 6, 30).unwrap()
    }

    fn sample() -> NelsonSiegelCurve {
        NelsonSiegelCurve::new(valuation(), 0.04, -0.02, 0.01, 2.0, DayCountType::Act365F).unwrap()
    }

    #[test]
    fn short_and_long_end_limits() {
        let curve = sample();
        assert_abs_diff_eq!(curve.zero_rate_time(0.0), 0.02, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.zero_rate_time(1e-10), 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.zero_rate_time(1e4), 0.04, epsilon = 1e-5);
        assert_eq!(curve.df(valuation()), 1.0);
    }

    #[test]
    fn zero_rate_matches_formula() {
        let curve = sample();
        let d = Date::from_ymd(2027, 6, 30).unwrap();
        let t = curve.time_from_valuation(d);
        let z = curve
            .zero_rate(d, Compounding::Continuous, Frequency::Annual)
            .unwrap();
        assert_abs_diff_eq!(z.rate(), curve.zero_rate_time(t), epsilon = 1e-14);
    }

    #[test]
    fn analytic_forward_matches_numeric() {
        let curve = sample();
        let svensson = NelsonSiegelSvenssonCurve::new(
            valuation(),
            0.04,
            -0.02,
            0.01,
            0.015,
            2.0,
            7.5,
            DayCountType::Act365F,
        )
        .unwrap();
        let h = 1e-5;
        for t in [0.25, 1.0, 4.0, 12.0] {
            let num = (curve.df_time(t - h).ln() - curve.df_time(t + h).ln()) / (2.0 * h);
            assert_abs_diff_eq!(curve.instantaneous_forward(t).unwrap(), num, epsilon = 1e-8);
            let num = (svensson.df_time(t - h).ln() - svensson.df_time(t + h).ln()) / (2.0 * h);
            assert_abs_diff_eq!(svensson.instantaneous_forward(t).unwrap(), num, epsilon = 1e-8);
        }
    }

    #[test]
    fn fit_recovers_grid_parameters() {
        let lambda = 0.05 * 1.1_f64.powi(25);
        let truth =
            NelsonSiegelCurve::new(valuation(), 0.035, -0.015, 0.02, lambda, DayCountType::Act365F)
                .unwrap();
        let times: Vec<Time> = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0].to_vec();
        let zeros: Vec<Rate> = times.iter().map(|&t| truth.zero_rate_time(t)).collect();
        let fitted =
            NelsonSiegelCurve::fit(valuation(), DayCountType::Act365F, &times, &zeros).unwrap();
        assert_abs_diff_eq!(fitted.lambda(), lambda, epsilon = 1e-12);
        for (a, b) in fitted.betas().iter().zip(truth.betas()) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn rejects_non_positive_decay() {
        let err = NelsonSiegelCurve::new(valuation(), 0.04, 0.0, 0.0, 0.0, DayCountType::Act365F)
            .unwrap_err();
        assert!(err.is_bad_input());
        assert!(NelsonSiegelSvenssonCurve::new(
            valuation(),
            0.04,
            0.0,
            0.0,
            0.0,
            1.0,
            -2.0,
            DayCountType::Act365F
        )
        .is_err());
    }
}
