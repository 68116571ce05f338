//! Table-driven holiday rules.
//!
//! Each jurisdiction is a `&'static [HolidayRule]`. A rule yields the
//! observed holiday date(s) for a given year; rules are evaluated in table
//! order so that substitute days can skip dates already taken by earlier
//! rules (UK Christmas and Boxing Day, for example).

use crate::date::{days_in_month, Date};
use crate::weekday::Weekday;

pub(crate) mod australia;
pub(crate) mod canada;
pub(crate) mod china;
pub(crate) mod germany;
pub(crate) mod switzerland;
pub(crate) mod target;
pub(crate) mod united_kingdom;
pub(crate) mod united_states;

/// User-defined holiday calendar.
pub mod bespoke_calendar;

/// How a fixed-date holiday falling on a weekend is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observance {
    /// Not moved. A weekend holiday is simply lost.
    Actual,
    /// Sunday moves to Monday; Saturday is lost.
    SundayToMonday,
    /// Saturday moves to Friday and Sunday to Monday.
    NearestWeekday,
    /// Saturday or Sunday moves to the following Monday.
    NextWeekday,
    /// Moves forward past weekends and past days already taken by earlier
    /// rules of the same table.
    NextFreeWeekday,
}

/// What a [`HolidayRule`] matches.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// A fixed month and day with an [`Observance`].
    Fixed {
        /// Month (1–12).
        month: u8,
        /// Day of month.
        day: u8,
        /// Weekend shift.
        observance: Observance,
    },
    /// `days` consecutive calendar days starting at a fixed month and day.
    FixedSpan {
        /// Month (1–12).
        month: u8,
        /// First day.
        day: u8,
        /// Length of the closure.
        days: u8,
    },
    /// The `n`-th given weekday of a month.
    NthWeekday {
        /// Occurrence, starting at 1.
        n: u8,
        /// Weekday.
        weekday: Weekday,
        /// Month (1–12).
        month: u8,
    },
    /// The last given weekday of a month.
    LastWeekday {
        /// Weekday.
        weekday: Weekday,
        /// Month (1–12).
        month: u8,
    },
    /// The last given weekday on or before a fixed month and day.
    WeekdayOnOrBefore {
        /// Weekday.
        weekday: Weekday,
        /// Month (1–12).
        month: u8,
        /// Day of month.
        day: u8,
    },
    /// Offset in days from Easter Sunday.
    Easter(i16),
    /// Closures of `days` calendar days starting at each listed date.
    Spans {
        /// Start dates as `(year, month, day)`.
        starts: &'static [(u16, u8, u8)],
        /// Length of each closure.
        days: u8,
    },
}

/// A holiday rule, optionally limited to a range of years.
#[derive(Debug, Clone, Copy)]
pub struct HolidayRule {
    kind: RuleKind,
    from: u16,
    to: u16,
    skip: &'static [u16],
}

impl HolidayRule {
    /// A rule that applies every year.
    pub const fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            from: 1900,
            to: 2199,
            skip: &[],
        }
    }

    /// Fixed date with an observance shift.
    pub const fn fixed(month: u8, day: u8, observance: Observance) -> Self {
        Self::new(RuleKind::Fixed {
            month,
            day,
            observance,
        })
    }

    /// `n`-th weekday of `month`.
    pub const fn nth(n: u8, weekday: Weekday, month: u8) -> Self {
        Self::new(RuleKind::NthWeekday { n, weekday, month })
    }

    /// Last weekday of `month`.
    pub const fn last(weekday: Weekday, month: u8) -> Self {
        Self::new(RuleKind::LastWeekday { weekday, month })
    }

    /// Easter Sunday plus `offset` days.
    pub const fn easter(offset: i16) -> Self {
        Self::new(RuleKind::Easter(offset))
    }

    /// Single dates, one day each.
    pub const fn one_off(dates: &'static [(u16, u8, u8)]) -> Self {
        Self::new(RuleKind::Spans {
            starts: dates,
            days: 1,
        })
    }

    /// Restrict to years on or after `year`.
    pub const fn since(mut self, year: u16) -> Self {
        self.from = year;
        self
    }

    /// Restrict to years on or before `year`.
    pub const fn until(mut self, year: u16) -> Self {
        self.to = year;
        self
    }

    /// Exclude the listed years.
    pub const fn except(mut self, years: &'static [u16]) -> Self {
        self.skip = years;
        self
    }

    fn applies(&self, year: u16) -> bool {
        year >= self.from && year <= self.to && !self.skip.contains(&year)
    }

    /// Push the observed date(s) of this rule in `year` onto `out`.
    fn observe(&self, year: u16, out: &mut Vec<Date>) {
        if !self.applies(year) {
            return;
        }
        match self.kind {
            RuleKind::Fixed {
                month,
                day,
                observance,
            } => {
                if let Ok(date) = Date::from_ymd(year, month, day) {
                    if let Some(observed) = shift(date, observance, out) {
                        out.push(observed);
                    }
                }
            }
            RuleKind::FixedSpan { month, day, days } => {
                if let Ok(start) = Date::from_ymd(year, month, day) {
                    push_span(start, days, out);
                }
            }
            RuleKind::NthWeekday { n, weekday, month } => {
                if let Ok(date) = Date::nth_weekday(n, weekday, year, month) {
                    out.push(date);
                }
            }
            RuleKind::LastWeekday { weekday, month } => {
                if let Ok(date) = Date::last_weekday(weekday, year, month) {
                    out.push(date);
                }
            }
            RuleKind::WeekdayOnOrBefore {
                weekday,
                month,
                day,
            } => {
                if let Ok(anchor) = Date::from_ymd(year, month, day.min(days_in_month(year, month)))
                {
                    let back = (anchor.weekday().ordinal() as i32 - weekday.ordinal() as i32)
                        .rem_euclid(7);
                    if let Ok(date) = anchor.add_days(-back) {
                        out.push(date);
                    }
                }
            }
            RuleKind::Easter(offset) => {
                if let Some(date) = easter_sunday(year).and_then(|e| e.add_days(offset as i32).ok())
                {
                    out.push(date);
                }
            }
            RuleKind::Spans { starts, days } => {
                for &(y, m, d) in starts.iter().filter(|s| s.0 == year) {
                    if let Ok(start) = Date::from_ymd(y, m, d) {
                        push_span(start, days, out);
                    }
                }
            }
        }
    }
}

fn push_span(start: Date, days: u8, out: &mut Vec<Date>) {
    out.extend((0..days as i32).filter_map(|k| start.add_days(k).ok()));
}

fn shift(date: Date, observance: Observance, taken: &[Date]) -> Option<Date> {
    let wd = date.weekday();
    match observance {
        Observance::Actual => Some(date),
        Observance::SundayToMonday => match wd {
            Weekday::Sunday => date.add_days(1).ok(),
            _ => Some(date),
        },
        Observance::NearestWeekday => match wd {
            Weekday::Saturday => date.add_days(-1).ok(),
            Weekday::Sunday => date.add_days(1).ok(),
            _ => Some(date),
        },
        Observance::NextWeekday => match wd {
            Weekday::Saturday => date.add_days(2).ok(),
            Weekday::Sunday => date.add_days(1).ok(),
            _ => Some(date),
        },
        Observance::NextFreeWeekday => {
            let mut d = date;
            while d.weekday().is_weekend() || taken.contains(&d) {
                d = d.add_days(1).ok()?;
            }
            Some(d)
        }
    }
}

/// Observed holidays of `rules` in `year`, in table order.
pub(crate) fn holidays_in_year(rules: &[HolidayRule], year: u16) -> Vec<Date> {
    let mut out = Vec::with_capacity(rules.len() + 4);
    for rule in rules {
        rule.observe(year, &mut out);
    }
    out
}

/// Whether `date` is an observed holiday under `rules`.
///
/// Late-December dates also consult the next year's table, which catches
/// New Year's Day observed on the preceding Friday.
pub(crate) fn is_listed_holiday(rules: &[HolidayRule], date: Date) -> bool {
    let (y, m, _) = date.ymd();
    if holidays_in_year(rules, y).contains(&date.date_only()) {
        return true;
    }
    m == 12 && y < 2199 && holidays_in_year(rules, y + 1).contains(&date.date_only())
}

/// Easter Sunday in the Gregorian calendar (Oudin's algorithm).
pub fn easter_sunday(year: u16) -> Option<Date> {
    let y = year as i32;
    let g = y % 19;
    let c = y / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (y + y / 4 + i + 2 - c + c / 4) % 7;
    let p = i - j;
    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;
    Date::from_ymd(year, month as u8, day as u8).ok()
}
