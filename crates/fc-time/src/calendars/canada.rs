//! Canada (Toronto settlement) holidays.

use super::{
    HolidayRule, RuleKind,
    Observance::{NextFreeWeekday, NextWeekday},
};
use crate::weekday::Weekday::Monday;

pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, NextWeekday),
    HolidayRule::nth(3, Monday, 2).since(2008),
    HolidayRule::easter(-2),
    HolidayRule::new(RuleKind::WeekdayOnOrBefore {
        weekday: Monday,
        month: 5,
        day: 24,
    }),
    HolidayRule::fixed(7, 1, NextWeekday),
    HolidayRule::nth(1, Monday, 8),
    HolidayRule::nth(1, Monday, 9),
    HolidayRule::fixed(9, 30, NextWeekday).since(2021),
    HolidayRule::nth(2, Monday, 10),
    HolidayRule::fixed(11, 11, NextWeekday),
    HolidayRule::fixed(12, 25, NextFreeWeekday),
    HolidayRule::fixed(12, 26, NextFreeWeekday),
];
