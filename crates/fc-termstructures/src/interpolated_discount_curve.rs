//! `InterpolatedDiscountCurve`: discount factors on pillar dates, joined by
//! an [`Interpolator`].

use fc_core::{ensure, DiscountFactor, Rate, Result, Time};
use fc_math::{InterpKind, Interpolator};
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// A discount curve interpolated between pillar discount factors.
///
/// The valuation date is always the first node, with a discount factor of
/// one; it is added when the pillars start later.
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    valuation: Date,
    day_count: DayCountType,
    dates: Vec<Date>,
    interp: Interpolator,
}

impl InterpolatedDiscountCurve {
    /// Build a curve from pillar dates and discount factors.
    ///
    /// # Errors
    /// `BadInput` if the inputs are empty or differ in length, the dates are
    /// not strictly increasing from the valuation date, a discount factor is
    /// not positive, a pillar on the valuation date has a discount factor
    /// other than one, or `day_count` needs a reference period.
    pub fn new(
        valuation: Date,
        dates: &[Date],
        dfs: &[DiscountFactor],
        kind: InterpKind,
        day_count: DayCountType,
    ) -> Result<Self> {
        ensure!(
            dates.len() == dfs.len(),
            "{} pillar dates but {} discount factors",
            dates.len(),
            dfs.len()
        );
        ensure!(!dates.is_empty(), "a discount curve needs at least one pillar");
        day_count.ensure_standalone()?;
        ensure!(
            dates[0] >= valuation,
            "pillar {:?} precedes valuation date {valuation:?}",
            dates[0]
        );
        ensure!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "pillar dates must be strictly increasing"
        );

        let (dates, dfs) = if dates[0] > valuation {
            let mut all_dates = Vec::with_capacity(dates.len() + 1);
            all_dates.push(valuation);
            all_dates.extend_from_slice(dates);
            let mut all_dfs = Vec::with_capacity(dfs.len() + 1);
            all_dfs.push(1.0);
            all_dfs.extend_from_slice(dfs);
            (all_dates, all_dfs)
        } else {
            (dates.to_vec(), dfs.to_vec())
        };
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| day_count.year_fraction(valuation, d))
            .collect();
        let interp = Interpolator::fit(kind, &times, &dfs)?;

        Ok(Self {
            valuation,
            day_count,
            dates,
            interp,
        })
    }

    /// Node dates, starting with the valuation date.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Node discount factors, starting with 1.
    pub fn dfs(&self) -> &[DiscountFactor] {
        self.interp.dfs()
    }

    /// Node times.
    pub fn times(&self) -> &[Time] {
        self.interp.times()
    }

    /// The interpolation rule.
    pub fn kind(&self) -> InterpKind {
        self.interp.kind()
    }

    /// The fitted interpolator.
    pub fn interpolator(&self) -> &Interpolator {
        &self.interp
    }
}

impl TermStructure for InterpolatedDiscountCurve {
    fn valuation_date(&self) -> Date {
        self.valuation
    }

    fn day_count(&self) -> DayCountType {
        self.day_count
    }
}

impl DiscountCurve for InterpolatedDiscountCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        self.interp.interpolate(t)
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        Some(self.interp.forward(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fc_core::Compounding;
    use fc_time::Frequency;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample() -> InterpolatedDiscountCurve {
        InterpolatedDiscountCurve::new(
            date(2020, 1, 1),
            &[date(2020, 7, 1), date(2021, 1, 1), date(2025, 1, 1)],
            &[0.99, 0.975, 0.88],
            InterpKind::FlatFwdRates,
            DayCountType::Act365F,
        )
        .unwrap()
    }

    #[test]
    fn valuation_node_is_prepended() {
        let curve = sample();
        assert_eq!(curve.dates()[0], date(2020, 1, 1));
        assert_eq!(curve.dfs()[0], 1.0);
        assert_eq!(curve.df(date(2020, 1, 1)), 1.0);
        assert_abs_diff_eq!(curve.df(date(2021, 1, 1)), 0.975, epsilon = 1e-15);
    }

    #[test]
    fn zero_rate_matches_log_discount() {
        let curve = sample();
        let d = date(2023, 3, 15);
        let t = curve.time_from_valuation(d);
        let z = curve
            .zero_rate(d, Compounding::Continuous, Frequency::Annual)
            .unwrap();
        assert_abs_diff_eq!(z.rate(), -curve.df(d).ln() / t, epsilon = 1e-15);
    }

    #[test]
    fn vector_queries_agree_with_scalar() {
        let curve = sample();
        let dates = [date(2020, 3, 1), date(2022, 6, 1), date(2027, 1, 1)];
        let dfs = curve.df_dates(&dates);
        let mut out = [0.0; 3];
        curve.df_into(&dates, &mut out).unwrap();
        for (k, &d) in dates.iter().enumerate() {
            assert_eq!(dfs[k], curve.df(d));
            assert_eq!(out[k], dfs[k]);
        }
    }

    #[test]
    fn rejects_bad_pillars() {
        let v = date(2020, 1, 1);
        let kind = InterpKind::FlatFwdRates;
        let dc = DayCountType::Act365F;
        assert!(InterpolatedDiscountCurve::new(v, &[], &[], kind, dc).is_err());
        assert!(InterpolatedDiscountCurve::new(v, &[date(2019, 1, 1)], &[1.01], kind, dc).is_err());
        assert!(InterpolatedDiscountCurve::new(
            v,
            &[date(2021, 1, 1), date(2020, 6, 1)],
            &[0.98, 0.99],
            kind,
            dc
        )
        .is_err());
        assert!(InterpolatedDiscountCurve::new(v, &[date(2021, 1, 1)], &[0.0], kind, dc)
            .unwrap_err()
            .is_bad_input());
    }
}
