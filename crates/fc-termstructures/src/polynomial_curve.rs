//! `PolynomialCurve`: continuously compounded zero rate `r(t) = Σ a_i t^i`.

use fc_core::{ensure, DiscountFactor, Rate, Real, Result, Time};
use fc_math::LinearLeastSquares;
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// Polynomial zero-rate curve.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCurve {
    valuation: Date,
    day_count: DayCountType,
    coefficients: Vec<Real>,
}

impl PolynomialCurve {
    /// A curve with zero rate `Σ coefficients[i]·t^i`.
    ///
    /// # Errors
    /// `BadInput` for an empty or non-finite coefficient list.
    pub fn new(valuation: Date, coefficients: &[Real], day_count: DayCountType) -> Result<Self> {
        ensure!(!coefficients.is_empty(), "a polynomial curve needs a coefficient");
        day_count.ensure_standalone()?;
        ensure!(
            coefficients.iter().all(|c| c.is_finite()),
            "polynomial coefficients must be finite"
        );
        Ok(Self {
            valuation,
            day_count,
            coefficients: coefficients.to_vec(),
        })
    }

    /// Least-squares fit of a degree-`degree` polynomial to `(time, zero
    /// rate)` observations.
    pub fn fit(
        valuation: Date,
        day_count: DayCountType,
        times: &[Time],
        zeros: &[Rate],
        degree: usize,
    ) -> Result<Self> {
        let basis: Vec<Box<dyn Fn(Real) -> Real>> = (0..=degree)
            .map(|i| Box::new(move |t: Real| t.powi(i as i32)) as Box<dyn Fn(Real) -> Real>)
            .collect();
        let ls = LinearLeastSquares::fit(times, zeros, &basis)?;
        Self::new(valuation, ls.coefficients(), day_count)
    }

    /// Coefficients, constant term first.
    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// Continuously compounded zero rate at `t`.
    pub fn zero_rate_time(&self, t: Time) -> Rate {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    fn zero_rate_slope(&self, t: Time) -> Real {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, &c)| acc * t + i as Real * c)
    }
}

impl TermStructure for PolynomialCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}

impl DiscountCurve for PolynomialCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        (-self.zero_rate_time(t) * t).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        Some(self.zero_rate_time(t) + t * self.zero_rate_slope(t))
    }
}
