//! Interest rate with compounding and day-counting conventions.
//!
//! An `InterestRate` bundles a rate value with a [`DayCountType`], a
//! [`Compounding`] convention, and a [`Frequency`]. Conversions between
//! compoundings are exact: a rate and its equivalent produce the same
//! compound factor over the same horizon.

use crate::date::Date;
use crate::day_count::DayCountType;
use crate::frequency::Frequency;
use fc_core::{ensure, fail, Compounding, Rate, Real, Result, Time};

/// An interest rate with associated compounding and day-counting conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterestRate {
    rate: Rate,
    day_count: DayCountType,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Create a new interest rate.
    ///
    /// `frequency` is only used by [`Compounding::Compounded`].
    pub fn new(
        rate: Rate,
        day_count: DayCountType,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        ensure!(rate.is_finite(), "non-finite rate {rate}");
        day_count.ensure_standalone()?;
        if compounding == Compounding::Compounded {
            ensure!(
                frequency.periods_per_year() > 0,
                "compounded rates need a periodic frequency, got {frequency}"
            );
        }
        Ok(Self {
            rate,
            day_count,
            compounding,
            frequency,
        })
    }

    /// A continuously compounded ACT/365F rate.
    pub fn continuous(rate: Rate) -> Result<Self> {
        Self::new(rate, DayCountType::Act365F, Compounding::Continuous, Frequency::Annual)
    }

    /// The rate value.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// The day count.
    pub fn day_count(&self) -> DayCountType {
        self.day_count
    }

    /// The compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compound factor over `t` years.
    pub fn compound_factor(&self, t: Time) -> Result<Real> {
        ensure!(t.is_finite(), "non-finite time {t}");
        let factor = match self.compounding {
            Compounding::Simple => 1.0 + self.rate * t,
            Compounding::Compounded => {
                let f = self.frequency.periods_per_year() as Real;
                (1.0 + self.rate / f).powf(f * t)
            }
            Compounding::Continuous => (self.rate * t).exp(),
        };
        ensure!(
            factor > 0.0 && factor.is_finite(),
            "rate {self} gives compound factor {factor} over {t} years"
        );
        Ok(factor)
    }

    /// Compound factor between two dates in this rate's day count.
    pub fn compound_factor_dates(&self, d1: Date, d2: Date) -> Result<Real> {
        self.compound_factor(self.day_count.year_fraction(d1, d2))
    }

    /// Discount factor over `t` years.
    pub fn discount_factor(&self, t: Time) -> Result<Real> {
        Ok(1.0 / self.compound_factor(t)?)
    }

    /// Discount factor between two dates in this rate's day count.
    pub fn discount_factor_dates(&self, d1: Date, d2: Date) -> Result<Real> {
        Ok(1.0 / self.compound_factor_dates(d1, d2)?)
    }

    /// The rate under `compounding`/`frequency` giving the same compound
    /// factor over `t` years.
    pub fn equivalent_rate(
        &self,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        Self::implied_rate(
            self.compound_factor(t)?,
            self.day_count,
            compounding,
            frequency,
            t,
        )
    }

    /// The rate implied by a compound factor observed over `t` years.
    ///
    /// At `t = 0` the compound factor carries no information and the
    /// result is a zero rate.
    pub fn implied_rate(
        compound: Real,
        day_count: DayCountType,
        compounding: Compounding,
        frequency: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        ensure!(
            compound > 0.0 && compound.is_finite(),
            "compound factor must be positive, got {compound}"
        );
        ensure!(t >= 0.0, "negative time {t}");
        let rate = if t == 0.0 {
            0.0
        } else {
            match compounding {
                Compounding::Simple => (compound - 1.0) / t,
                Compounding::Compounded => {
                    let f = frequency.periods_per_year() as Real;
                    if f == 0.0 {
                        fail!("compounded rates need a periodic frequency, got {frequency}");
                    }
                    (compound.powf(1.0 / (f * t)) - 1.0) * f
                }
                Compounding::Continuous => compound.ln() / t,
            }
        };
        Self::new(rate, day_count, compounding, frequency)
    }
}

impl std::fmt::Display for InterestRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}% {} {}", self.rate * 100.0, self.day_count, self.compounding)?;
        if self.compounding == Compounding::Compounded {
            write!(f, " {}", self.frequency)?;
        }
        Ok(())
    }
}
