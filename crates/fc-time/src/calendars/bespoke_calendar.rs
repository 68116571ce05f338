//! Calendar with run-time holidays on top of Saturday/Sunday weekends.

use std::collections::BTreeSet;

use crate::calendar::Calendar;
use crate::date::Date;

/// A named calendar whose holidays are supplied by the caller, e.g. a desk
/// or exchange calendar loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BespokeCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl BespokeCalendar {
    /// Weekends only until holidays are added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    /// Weekends plus `holidays`. Intraday times are dropped.
    pub fn with_holidays(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        let mut calendar = Self::new(name);
        for d in holidays {
            calendar.add_holiday(d);
        }
        calendar
    }

    /// Mark `date` as a holiday; returns `false` if it already was one.
    pub fn add_holiday(&mut self, date: Date) -> bool {
        self.holidays.insert(date.date_only())
    }

    /// Unmark `date`; returns `false` if it was not a holiday.
    pub fn remove_holiday(&mut self, date: Date) -> bool {
        self.holidays.remove(&date.date_only())
    }

    /// Caller-supplied holidays in date order.
    pub fn holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }
}

impl Calendar for BespokeCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date.date_only())
    }
}
