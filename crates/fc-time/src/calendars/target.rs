//! TARGET (euro settlement) holidays.

use super::{HolidayRule, Observance::Actual};

/// Weekends plus New Year's Day, Good Friday, Easter Monday, Labour Day,
/// Christmas and Boxing Day. Valid from 1999.
pub(crate) const RULES: &[HolidayRule] = &[
    HolidayRule::fixed(1, 1, Actual),
    HolidayRule::easter(-2).since(2000),
    HolidayRule::easter(1).since(2000),
    HolidayRule::fixed(5, 1, Actual).since(2000),
    HolidayRule::fixed(12, 25, Actual),
    HolidayRule::fixed(12, 26, Actual),
    HolidayRule::one_off(&[(1998, 12, 31), (1999, 12, 31), (2001, 12, 31)]),
];

#[cfg(test)]
mod tests {
    use crate::calendar::{Calendar, CalendarType};
    use crate::date::Date;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn easter_2023() {
        let cal = CalendarType::Target;
        assert!(!cal.is_business_day(date(2023, 4, 7)));
        assert!(!cal.is_business_day(date(2023, 4, 10)));
        assert!(cal.is_business_day(date(2023, 4, 11)));
    }

    #[test]
    fn fixed_holidays() {
        let cal = CalendarType::Target;
        assert!(!cal.is_business_day(date(2023, 5, 1)));
        assert!(!cal.is_business_day(date(2023, 12, 25)));
        assert!(!cal.is_business_day(date(2023, 12, 26)));
        assert!(!cal.is_business_day(date(2001, 12, 31)));
        assert!(cal.is_business_day(date(2023, 6, 15)));
    }
}
