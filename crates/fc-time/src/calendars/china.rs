//! Shanghai Stock Exchange holidays.
//!
//! Lunar holidays are tabulated. Spring Festival closures cover 2015–2030
//! as five calendar days from New Year's Day; the exchange's announced
//! schedules (and the weekend make-up days) differ slightly year to year.

use super::{HolidayRule, Observance::Actual, RuleKind};

const SPRING_FESTIVAL: &[(u16, u8, u8)] = &[
    (2015, 2, 19),
    (2016, 2, 8),
    (2017, 1, 28),
    (2018, 2, 16),
    (2019, 2, 5),
    (2020, 1, 25),
    (2021, 2, 12),
    (2022, 2, 1),
    (2023, 1, 22),
    (2024, 2, 10),
    (2025, 1, 29),
    (2026, 2, 17),
    (2027, 2, 6),
    (2028, 1, 26),
    (2029, 2, 13),
    (2030, 2, 3),
];

pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, Actual),
    HolidayRule::new(RuleKind::Spans {
        starts: SPRING_FESTIVAL,
        days: 5,
    }),
    HolidayRule::fixed(4, 5, Actual),
    HolidayRule::new(RuleKind::FixedSpan {
        month: 5,
        day: 1,
        days: 3,
    }),
    HolidayRule::new(RuleKind::FixedSpan {
        month: 10,
        day: 1,
        days: 7,
    }),
];
