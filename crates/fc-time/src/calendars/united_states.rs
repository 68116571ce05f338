//! United States settlement holidays.

use super::{HolidayRule, Observance::NearestWeekday};
use crate::weekday::Weekday::{Monday, Thursday};

/// Federal holidays, with Saturday holidays observed on Friday and Sunday
/// holidays on Monday.
pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, NearestWeekday),
    HolidayRule::nth(3, Monday, 1).since(1983),
    HolidayRule::nth(3, Monday, 2),
    HolidayRule::last(Monday, 5),
    HolidayRule::fixed(6, 19, NearestWeekday).since(2022),
    HolidayRule::fixed(7, 4, NearestWeekday),
    HolidayRule::nth(1, Monday, 9),
    HolidayRule::nth(2, Monday, 10),
    HolidayRule::fixed(11, 11, NearestWeekday),
    HolidayRule::nth(4, Thursday, 11),
    HolidayRule::fixed(12, 25, NearestWeekday),
];
