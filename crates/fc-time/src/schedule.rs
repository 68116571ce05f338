//! `Schedule`: the accrual/payment dates of a periodic instrument.
//!
//! A `Schedule` is generated from an effective date, a termination date, a
//! frequency, a calendar and a business-day convention. Dates are stepped
//! from one anchor (the termination date for backward generation, the
//! effective date for forward generation), so at most one stub period
//! appears, on the side away from the anchor.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::frequency::Frequency;
use fc_core::errors::{Error, Result};
use fc_core::ensure;

/// Date generation rule for schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Dates generated backward from the termination date.
    #[default]
    Backward,
    /// Dates generated forward from the effective date.
    Forward,
}

/// An ordered sequence of adjusted coupon dates.
///
/// Dates are strictly increasing. The first is the adjusted effective date;
/// the last is the termination date, adjusted if requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    dates: Vec<Date>,
    unadjusted: Vec<Date>,
    is_regular: Vec<bool>,
}

impl Schedule {
    /// Build a schedule from explicit, strictly increasing dates.
    pub fn from_dates(dates: Vec<Date>) -> Result<Self> {
        ensure!(dates.len() >= 2, "a schedule needs at least two dates");
        ensure!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "schedule dates must be strictly increasing"
        );
        Ok(Self {
            is_regular: vec![true; dates.len() - 1],
            unadjusted: dates.clone(),
            dates,
        })
    }

    /// All adjusted dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The dates before business-day adjustment (after end-of-month
    /// snapping).
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always `false`; a schedule holds at least two dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The `i`-th adjusted date.
    pub fn date(&self, i: usize) -> Result<Date> {
        self.dates.get(i).copied().ok_or(Error::IndexOutOfRange {
            index: i,
            size: self.dates.len(),
        })
    }

    /// The adjusted effective date.
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// The (possibly adjusted) termination date.
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Consecutive `(start, end)` pairs of adjusted dates.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Whether period `i` (between dates `i` and `i + 1`) spans exactly one
    /// frequency step.
    pub fn is_regular(&self, i: usize) -> bool {
        self.is_regular.get(i).copied().unwrap_or(false)
    }
}

/// Builder for [`Schedule`].
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    effective_date: Date,
    termination_date: Date,
    frequency: Frequency,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    rule: DateGeneration,
    adjust_termination: bool,
    end_of_month: bool,
}

impl<'a> ScheduleBuilder<'a> {
    /// Begin building a schedule. Defaults: `Following`, backward
    /// generation, adjusted termination date, no end-of-month snapping.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        frequency: Frequency,
        calendar: &'a dyn Calendar,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            frequency,
            calendar,
            convention: BusinessDayConvention::Following,
            rule: DateGeneration::Backward,
            adjust_termination: true,
            end_of_month: false,
        }
    }

    /// Set the business-day convention.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Whether the termination date is business-day adjusted.
    pub fn adjust_termination(mut self, flag: bool) -> Self {
        self.adjust_termination = flag;
        self
    }

    /// Snap generated dates to month-end when the anchor is a month-end.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    fn step(&self, anchor: Date, k: i32) -> Result<Date> {
        match self.frequency {
            Frequency::Weekly => anchor.add_days(7 * k),
            f => anchor.add_months(k * f.months() as i32),
        }
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;
        ensure!(
            start < end,
            "effective date {start:?} must be before termination date {end:?}"
        );

        let (unadjusted, is_regular) = if self.frequency == Frequency::Once {
            (vec![start, end], vec![true])
        } else {
            self.generate(start, end)?
        };

        let last = unadjusted.len() - 1;
        let mut dates = Vec::with_capacity(unadjusted.len());
        let mut kept_unadjusted = Vec::with_capacity(unadjusted.len());
        let mut kept_regular = Vec::with_capacity(is_regular.len());
        for (i, &d) in unadjusted.iter().enumerate() {
            let adjusted = if i == last && !self.adjust_termination {
                d
            } else {
                self.calendar.adjust(d, self.convention)
            };
            match dates.last() {
                Some(&prev) if adjusted <= prev => {
                    // Collapsed onto the previous date: the merged period is
                    // irregular and the later date wins.
                    if i == last {
                        dates.pop();
                        kept_unadjusted.pop();
                        dates.push(adjusted);
                        kept_unadjusted.push(d);
                    }
                    if let Some(flag) = kept_regular.last_mut() {
                        *flag = false;
                    }
                }
                _ => {
                    if i > 0 {
                        kept_regular.push(is_regular[i - 1]);
                    }
                    dates.push(adjusted);
                    kept_unadjusted.push(d);
                }
            }
        }
        ensure!(
            dates.len() >= 2,
            "schedule from {start:?} to {end:?} collapses to a single date"
        );
        Ok(Schedule {
            dates,
            unadjusted: kept_unadjusted,
            is_regular: kept_regular,
        })
    }

    /// Unadjusted dates and per-period regularity flags.
    fn generate(&self, start: Date, end: Date) -> Result<(Vec<Date>, Vec<bool>)> {
        let backward = self.rule == DateGeneration::Backward;
        let anchor = if backward { end } else { start };
        let snap = self.end_of_month && anchor.is_eom() && self.frequency != Frequency::Weekly;
        let direction = if backward { -1 } else { 1 };

        let mut generated = Vec::new();
        let mut stub_is_regular = false;
        for k in 1.. {
            let raw = self.step(anchor, direction * k)?;
            let candidate = if snap { raw.eom() } else { raw };
            let past = if backward {
                candidate <= start
            } else {
                candidate >= end
            };
            if past {
                stub_is_regular = candidate == if backward { start } else { end };
                break;
            }
            generated.push(candidate);
        }

        let n_periods = generated.len() + 1;
        let mut is_regular = vec![true; n_periods];
        let mut dates = Vec::with_capacity(n_periods + 1);
        if backward {
            generated.reverse();
            dates.push(start);
            dates.extend(generated);
            dates.push(end);
            is_regular[0] = stub_is_regular;
        } else {
            dates.push(start);
            dates.extend(generated);
            dates.push(end);
            is_regular[n_periods - 1] = stub_is_regular;
        }
        Ok((dates, is_regular))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarType;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn once_schedule() {
        let cal = CalendarType::Weekend;
        let sched = ScheduleBuilder::new(date(2023, 1, 1), date(2025, 1, 1), Frequency::Once, &cal)
            .build()
            .unwrap();
        assert_eq!(sched.dates(), &[date(2023, 1, 2), date(2025, 1, 1)]);
    }

    #[test]
    fn annual_backward_schedule() {
        let cal = CalendarType::None;
        let sched =
            ScheduleBuilder::new(date(2020, 1, 1), date(2023, 1, 1), Frequency::Annual, &cal)
                .build()
                .unwrap();
        assert_eq!(sched.len(), 4);
        assert!((0..3).all(|i| sched.is_regular(i)));
    }

    #[test]
    fn backward_short_stub_at_front() {
        let cal = CalendarType::None;
        let sched =
            ScheduleBuilder::new(date(2020, 2, 15), date(2021, 1, 1), Frequency::Quarterly, &cal)
                .build()
                .unwrap();
        assert_eq!(
            sched.dates(),
            &[
                date(2020, 2, 15),
                date(2020, 4, 1),
                date(2020, 7, 1),
                date(2020, 10, 1),
                date(2021, 1, 1)
            ]
        );
        assert!(!sched.is_regular(0));
        assert!(sched.is_regular(1));
    }

    #[test]
    fn forward_short_stub_at_back() {
        let cal = CalendarType::None;
        let sched =
            ScheduleBuilder::new(date(2020, 1, 1), date(2020, 11, 15), Frequency::Quarterly, &cal)
                .with_rule(DateGeneration::Forward)
                .build()
                .unwrap();
        assert_eq!(sched.end_date(), date(2020, 11, 15));
        assert_eq!(sched.date(3).unwrap(), date(2020, 10, 1));
        assert!(!sched.is_regular(3));
        assert!(sched.date(9).is_err());
    }

    #[test]
    fn end_of_month_snapping() {
        let cal = CalendarType::None;
        let sched =
            ScheduleBuilder::new(date(2019, 2, 28), date(2020, 2, 29), Frequency::Quarterly, &cal)
                .end_of_month(true)
                .build()
                .unwrap();
        assert_eq!(
            sched.unadjusted_dates(),
            &[
                date(2019, 2, 28),
                date(2019, 5, 31),
                date(2019, 8, 31),
                date(2019, 11, 30),
                date(2020, 2, 29)
            ]
        );
    }

    #[test]
    fn unadjusted_termination() {
        let cal = CalendarType::Weekend;
        let sched = ScheduleBuilder::new(
            date(2018, 6, 20),
            date(2020, 6, 20),
            Frequency::Semiannual,
            &cal,
        )
        .adjust_termination(false)
        .build()
        .unwrap();
        assert_eq!(sched.end_date(), date(2020, 6, 20));
    }

    #[test]
    fn rejects_inverted_dates() {
        let cal = CalendarType::Weekend;
        let err = ScheduleBuilder::new(date(2020, 1, 1), date(2020, 1, 1), Frequency::Annual, &cal)
            .build()
            .unwrap_err();
        assert!(err.is_bad_input());
    }
}
