//! Piecewise flat-forward and piecewise linear-zero curves.

use fc_core::{ensure, DiscountFactor, Rate, Real, Result, Time};
use fc_math::{Interpolation1D, LinearInterpolation};
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// Pillar times for dates strictly after the valuation date.
fn pillar_times(
    valuation: Date,
    dates: &[Date],
    values: &[Real],
    day_count: DayCountType,
) -> Result<Vec<Time>> {
    ensure!(
        dates.len() == values.len(),
        "{} pillar dates but {} rates",
        dates.len(),
        values.len()
    );
    ensure!(!dates.is_empty(), "a piecewise curve needs at least one pillar");
    ensure!(
        dates[0] > valuation && dates.windows(2).all(|w| w[0] < w[1]),
        "pillar dates must be strictly increasing after the valuation date"
    );
    ensure!(values.iter().all(|v| v.is_finite()), "pillar rates must be finite");
    day_count.ensure_standalone()?;
    Ok(dates
        .iter()
        .map(|&d| day_count.year_fraction(valuation, d))
        .collect())
}

// ── Flat forward ──────────────────────────────────────────────────────────────

/// Instantaneous forwards constant on `(t_{i−1}, t_i]`, the last one
/// extended beyond the final pillar.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseFlatForwardCurve {
    valuation: Date,
    day_count: DayCountType,
    dates: Vec<Date>,
    times: Vec<Time>,
    forwards: Vec<Rate>,
    /// `∫_0^{t_i} f(s) ds`.
    integrals: Vec<Real>,
}

impl PiecewiseFlatForwardCurve {
    /// A curve whose forward up to `dates[i]` is `forwards[i]`.
    pub fn new(
        valuation: Date,
        dates: &[Date],
        forwards: &[Rate],
        day_count: DayCountType,
    ) -> Result<Self> {
        let times = pillar_times(valuation, dates, forwards, day_count)?;
        let mut integrals = Vec::with_capacity(times.len());
        let (mut prev_t, mut acc) = (0.0, 0.0);
        for (&t, &f) in times.iter().zip(forwards) {
            acc += f * (t - prev_t);
            integrals.push(acc);
            prev_t = t;
        }
        Ok(Self {
            valuation,
            day_count,
            dates: dates.to_vec(),
            times,
            forwards: forwards.to_vec(),
            integrals,
        })
    }

    /// Pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Forward on each pillar interval.
    pub fn forwards(&self) -> &[Rate] {
        &self.forwards
    }

    fn segment(&self, t: Time) -> usize {
        self.times
            .partition_point(|&ti| ti < t)
            .min(self.times.len() - 1)
    }
}

impl TermStructure for PiecewiseFlatForwardCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}

impl DiscountCurve for PiecewiseFlatForwardCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        let k = self.segment(t);
        let (t0, i0) = if k == 0 {
            (0.0, 0.0)
        } else {
            (self.times[k - 1], self.integrals[k - 1])
        };
        (-(i0 + self.forwards[k] * (t - t0))).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        Some(self.forwards[self.segment(t)])
    }
}

// ── Linear zero ───────────────────────────────────────────────────────────────

/// Continuously compounded zero rates linear between pillars, flat outside.
///
/// The rate at the valuation date is taken equal to the first pillar rate.
#[derive(Debug, Clone)]
pub struct PiecewiseLinearZeroCurve {
    valuation: Date,
    day_count: DayCountType,
    dates: Vec<Date>,
    zeros: LinearInterpolation,
}

impl PiecewiseLinearZeroCurve {
    /// A curve through `(dates[i], zeros[i])`.
    pub fn new(
        valuation: Date,
        dates: &[Date],
        zeros: &[Rate],
        day_count: DayCountType,
    ) -> Result<Self> {
        let times = pillar_times(valuation, dates, zeros, day_count)?;
        let mut xs = Vec::with_capacity(times.len() + 1);
        xs.push(0.0);
        xs.extend(times);
        let mut ys = Vec::with_capacity(zeros.len() + 1);
        ys.push(zeros[0]);
        ys.extend_from_slice(zeros);
        Ok(Self {
            valuation,
            day_count,
            dates: dates.to_vec(),
            zeros: LinearInterpolation::new(&xs, &ys)?,
        })
    }

    /// Pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Continuously compounded zero rate at `t`.
    pub fn zero_rate_time(&self, t: Time) -> Rate {
        let t = t.clamp(self.zeros.x_min(), self.zeros.x_max());
        self.zeros.operator(t)
    }
}

impl TermStructure for PiecewiseLinearZeroCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}

impl DiscountCurve for PiecewiseLinearZeroCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        (-self.zero_rate_time(t) * t).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        let slope = if t > self.zeros.x_min() && t < self.zeros.x_max() {
            self.zeros.derivative(t)
        } else {
            0.0
        };
        Some(self.zero_rate_time(t) + t * slope)
    }
}
