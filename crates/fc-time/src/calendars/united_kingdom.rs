//! United Kingdom (London settlement) holidays.

use super::{
    HolidayRule,
    Observance::{NextFreeWeekday, NextWeekday},
};
use crate::weekday::Weekday::Monday;

/// Bank holidays of England and Wales, including the one-off royal and
/// jubilee days.
pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, NextWeekday),
    HolidayRule::easter(-2),
    HolidayRule::easter(1),
    HolidayRule::nth(1, Monday, 5).since(1978).except(&[1995, 2020]),
    HolidayRule::last(Monday, 5).except(&[2002, 2012, 2022]),
    HolidayRule::last(Monday, 8),
    HolidayRule::fixed(12, 25, NextFreeWeekday),
    HolidayRule::fixed(12, 26, NextFreeWeekday),
    HolidayRule::one_off(&[
        (1995, 5, 8),
        (1999, 12, 31),
        (2002, 6, 3),
        (2002, 6, 4),
        (2011, 4, 29),
        (2012, 6, 4),
        (2012, 6, 5),
        (2020, 5, 8),
        (2022, 6, 2),
        (2022, 6, 3),
        (2022, 9, 19),
        (2023, 5, 8),
    ]),
];

#[cfg(test)]
mod tests {
    use crate::calendar::{Calendar, CalendarType};
    use crate::date::Date;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn new_year_substitute() {
        // 2023-01-01 is a Sunday.
        assert!(!CalendarType::UnitedKingdom.is_business_day(date(2023, 1, 2)));
    }

    #[test]
    fn christmas_substitutes_2021() {
        let cal = CalendarType::UnitedKingdom;
        assert!(!cal.is_business_day(date(2021, 12, 27)));
        assert!(!cal.is_business_day(date(2021, 12, 28)));
        assert!(cal.is_business_day(date(2021, 12, 29)));
    }

    #[test]
    fn moved_bank_holidays() {
        let cal = CalendarType::UnitedKingdom;
        assert!(cal.is_business_day(date(2020, 5, 4)));
        assert!(!cal.is_business_day(date(2020, 5, 8)));
        assert!(!cal.is_business_day(date(2023, 5, 1)));
        assert!(!cal.is_business_day(date(2023, 5, 8)));
        assert!(!cal.is_business_day(date(2022, 6, 2)));
        assert!(cal.is_business_day(date(2022, 5, 30)));
    }
}
