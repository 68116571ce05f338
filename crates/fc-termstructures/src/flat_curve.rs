//! `FlatCurve`: a single rate for every maturity.
//!
//! The rate keeps its own compounding, so a simple-compounded flat curve
//! discounts with `1/(1 + r·t)` rather than a converted continuous rate.

use fc_core::{Compounding, DiscountFactor, Rate, Real, Result, Time};
use fc_time::{Date, DayCountType, Frequency, InterestRate};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// A flat yield curve.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCurve {
    valuation: Date,
    rate: InterestRate,
}

impl FlatCurve {
    /// A flat curve at `rate` under the given conventions.
    ///
    /// # Errors
    /// `BadInput` for a non-finite rate or compounded rates without a
    /// periodic frequency.
    pub fn new(
        valuation: Date,
        rate: Rate,
        day_count: DayCountType,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        Ok(Self::from_rate(
            valuation,
            InterestRate::new(rate, day_count, compounding, frequency)?,
        ))
    }

    /// A flat, continuously compounded ACT/365F curve.
    pub fn continuous(valuation: Date, rate: Rate) -> Result<Self> {
        Ok(Self::from_rate(valuation, InterestRate::continuous(rate)?))
    }

    /// A flat curve from an existing [`InterestRate`].
    pub fn from_rate(valuation: Date, rate: InterestRate) -> Self {
        Self { valuation, rate }
    }

    /// The curve rate and its conventions.
    pub fn rate(&self) -> &InterestRate {
        &self.rate
    }
}

impl TermStructure for FlatCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.rate.day_count()
    }
}

impl DiscountCurve for FlatCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        let r = self.rate.rate();
        match self.rate.compounding() {
            Compounding::Simple => 1.0 / (1.0 + r * t),
            Compounding::Compounded => {
                let f = self.rate.frequency().periods_per_year() as Real;
                (1.0 + r / f).powf(-f * t)
            }
            Compounding::Continuous => (-r * t).exp(),
        }
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        let r = self.rate.rate();
        Some(match self.rate.compounding() {
            Compounding::Simple => r / (1.0 + r * t),
            Compounding::Compounded => {
                let f = self.rate.frequency().periods_per_year() as Real;
                f * (1.0 + r / f).ln()
            }
            Compounding::Continuous => r,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn continuous_discounting() {
        let curve = FlatCurve::continuous(date(2018, 1, 1), 0.05).unwrap();
        assert_eq!(curve.df(date(2018, 1, 1)), 1.0);
        assert_abs_diff_eq!(curve.df_time(1.0), (-0.05_f64).exp(), epsilon = 1e-15);
        assert_eq!(curve.fwd(date(2030, 1, 1)), 0.05);
    }

    #[test]
    fn compounded_rate_keeps_its_convention() {
        let curve = FlatCurve::new(
            date(2020, 1, 1),
            0.04,
            DayCountType::Act365F,
            Compounding::Compounded,
            Frequency::Semiannual,
        )
        .unwrap();
        assert_abs_diff_eq!(curve.df_time(2.0), 1.02_f64.powi(-4), epsilon = 1e-15);
        let z = curve
            .zero_rate(date(2023, 1, 1), Compounding::Compounded, Frequency::Semiannual)
            .unwrap();
        assert_abs_diff_eq!(z.rate(), 0.04, epsilon = 1e-13);
    }

    #[test]
    fn simple_forward_matches_discount_slope() {
        let curve = FlatCurve::new(
            date(2020, 1, 1),
            0.03,
            DayCountType::Act360,
            Compounding::Simple,
            Frequency::Once,
        )
        .unwrap();
        let t = 1.5;
        let h = 1e-6;
        let numeric = (curve.df_time(t - h).ln() - curve.df_time(t + h).ln()) / (2.0 * h);
        assert_abs_diff_eq!(curve.instantaneous_forward(t).unwrap(), numeric, epsilon = 1e-8);
    }

    #[test]
    fn rejects_non_finite_rate() {
        assert!(FlatCurve::continuous(date(2020, 1, 1), Real::NAN)
            .unwrap_err()
            .is_bad_input());
    }
}
