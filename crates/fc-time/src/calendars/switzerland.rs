//! Switzerland (Zurich settlement) holidays.

use super::{HolidayRule, Observance::Actual};

pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, Actual),
    HolidayRule::fixed(1, 2, Actual),
    HolidayRule::easter(-2),
    HolidayRule::easter(1),
    HolidayRule::fixed(5, 1, Actual),
    HolidayRule::easter(39),
    HolidayRule::easter(50),
    HolidayRule::fixed(8, 1, Actual),
    HolidayRule::fixed(12, 25, Actual),
    HolidayRule::fixed(12, 26, Actual),
];
