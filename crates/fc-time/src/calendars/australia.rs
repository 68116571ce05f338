//! Australia (Sydney settlement) holidays.

use super::{
    HolidayRule,
    Observance::{Actual, NextFreeWeekday, NextWeekday},
};
use crate::weekday::Weekday::Monday;

pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, NextWeekday),
    HolidayRule::fixed(1, 26, NextWeekday),
    HolidayRule::easter(-2),
    HolidayRule::easter(1),
    HolidayRule::fixed(4, 25, Actual),
    HolidayRule::nth(2, Monday, 6),
    HolidayRule::nth(1, Monday, 8),
    HolidayRule::nth(1, Monday, 10),
    HolidayRule::fixed(12, 25, NextFreeWeekday),
    HolidayRule::fixed(12, 26, NextFreeWeekday),
];
