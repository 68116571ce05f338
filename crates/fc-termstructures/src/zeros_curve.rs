//! `ZerosCurve`: zero rates on pillar dates.
//!
//! Each quoted zero rate is turned into a pillar discount factor under its
//! own compounding; the discount factors are then interpolated with the
//! chosen [`InterpKind`].

use fc_core::{ensure, Compounding, DiscountFactor, Rate, Result, Time};
use fc_math::InterpKind;
use fc_time::{Date, DayCountType, Frequency, InterestRate};

use crate::discount_curve::DiscountCurve;
use crate::interpolated_discount_curve::InterpolatedDiscountCurve;
use crate::term_structure::TermStructure;

/// A curve defined by zero rates at pillar dates.
#[derive(Debug, Clone)]
pub struct ZerosCurve {
    zeros: Vec<Rate>,
    compounding: Compounding,
    frequency: Frequency,
    curve: InterpolatedDiscountCurve,
}

impl ZerosCurve {
    /// Build a curve from pillar dates and zero rates quoted under
    /// `compounding`/`frequency` in `day_count`.
    pub fn new(
        valuation: Date,
        dates: &[Date],
        zeros: &[Rate],
        compounding: Compounding,
        frequency: Frequency,
        kind: InterpKind,
        day_count: DayCountType,
    ) -> Result<Self> {
        day_count.ensure_standalone()?;
        ensure!(
            dates.len() == zeros.len(),
            "{} pillar dates but {} zero rates",
            dates.len(),
            zeros.len()
        );
        let dfs = dates
            .iter()
            .zip(zeros)
            .map(|(&d, &r)| {
                let t: Time = day_count.year_fraction(valuation, d);
                InterestRate::new(r, day_count, compounding, frequency)?.discount_factor(t)
            })
            .collect::<Result<Vec<DiscountFactor>>>()?;
        Ok(Self {
            zeros: zeros.to_vec(),
            compounding,
            frequency,
            curve: InterpolatedDiscountCurve::new(valuation, dates, &dfs, kind, day_count)?,
        })
    }

    /// The quoted zero rates.
    pub fn zeros(&self) -> &[Rate] {
        &self.zeros
    }

    /// Compounding of the quoted rates.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Compounding frequency of the quoted rates.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Node dates, starting with the valuation date.
    pub fn dates(&self) -> &[Date] {
        self.curve.dates()
    }
}

impl TermStructure for ZerosCurve {
    fn valuation_date(&self) -> Date {
        self.curve.valuation_date()
    }

    fn day_count(&self) -> DayCountType {
        self.curve.day_count()
    }
}

impl DiscountCurve for ZerosCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        self.curve.df_time(t)
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        self.curve.instantaneous_forward(t)
    }
}
