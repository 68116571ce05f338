//! `Calendar` trait and the built-in jurisdictions.
//!
//! A calendar knows which dates are business days and can adjust dates
//! according to a [`BusinessDayConvention`].

use crate::business_day_convention::BusinessDayConvention;
use crate::calendars::{self, HolidayRule};
use crate::date::Date;
use fc_core::errors::{Error, Result};

/// A financial calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"TARGET"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` is a weekend according to this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if `date` is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        date.add_days(1).map_or(true, |next| {
            date.month() != self.adjust(next, BusinessDayConvention::Following).month()
        })
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date.eom(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    ///
    /// Idempotent: adjusting an adjusted date returns it unchanged. The
    /// modified conventions never leave the month of `date`. Rolling stops
    /// at the ends of the supported date range.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        let step_while_holiday = |mut d: Date, step: i32| {
            while self.is_holiday(d) {
                match d.add_days(step) {
                    Ok(next) => d = next,
                    Err(_) => break,
                }
            }
            d
        };
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => step_while_holiday(date, 1),
            BusinessDayConvention::Preceding => step_while_holiday(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = step_while_holiday(date, 1);
                if adjusted.month() != date.month() {
                    step_while_holiday(date, -1)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = step_while_holiday(date, -1);
                if adjusted.month() != date.month() {
                    step_while_holiday(date, 1)
                } else {
                    adjusted
                }
            }
        }
    }

    /// Advance `date` by `n` business days.
    ///
    /// # Errors
    /// `BadInput` if the result leaves the supported date range.
    fn advance_business_days(&self, mut date: Date, n: i32) -> Result<Date> {
        let step = n.signum();
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            date = date.add_days(step)?;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        Ok(date)
    }

    /// Count the business days between `d1` (exclusive) and `d2`
    /// (inclusive). Negative if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> i32 {
        let (start, end, sign) = if d2 >= d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let count = (start.serial() + 1..=end.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|&d| self.is_business_day(d))
            .count() as i32;
        sign * count
    }

    /// Holidays falling on weekdays in `[from, to]`.
    fn holiday_list(&self, from: Date, to: Date) -> Vec<Date> {
        (from.serial()..=to.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|&d| !self.is_weekend(d) && self.is_holiday(d))
            .collect()
    }
}

/// Built-in jurisdictions.
///
/// Every variant except [`CalendarType::None`] treats Saturday and Sunday
/// as non-business days; the jurisdictions add their holiday tables on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarType {
    /// Every day is a business day.
    None,
    /// Saturdays and Sundays only.
    #[default]
    Weekend,
    /// TARGET (euro settlement).
    Target,
    /// United States settlement.
    UnitedStates,
    /// United Kingdom (London).
    UnitedKingdom,
    /// Germany (Frankfurt).
    Germany,
    /// Switzerland (Zurich).
    Switzerland,
    /// Canada (Toronto).
    Canada,
    /// Australia (Sydney).
    Australia,
    /// Shanghai Stock Exchange.
    ChinaSse,
}

impl CalendarType {
    /// All jurisdictions, in declaration order.
    pub const ALL: [CalendarType; 10] = [
        CalendarType::None,
        CalendarType::Weekend,
        CalendarType::Target,
        CalendarType::UnitedStates,
        CalendarType::UnitedKingdom,
        CalendarType::Germany,
        CalendarType::Switzerland,
        CalendarType::Canada,
        CalendarType::Australia,
        CalendarType::ChinaSse,
    ];

    fn rules(&self) -> &'static [HolidayRule] {
        match self {
            CalendarType::None | CalendarType::Weekend => &[],
            CalendarType::Target => calendars::target::RULES,
            CalendarType::UnitedStates => calendars::united_states::RULES,
            CalendarType::UnitedKingdom => calendars::united_kingdom::RULES,
            CalendarType::Germany => calendars::germany::RULES,
            CalendarType::Switzerland => calendars::switzerland::RULES,
            CalendarType::Canada => calendars::canada::RULES,
            CalendarType::Australia => calendars::australia::RULES,
            CalendarType::ChinaSse => calendars::china::RULES,
        }
    }

    /// Observed holidays of `year`, including those falling on weekends.
    pub fn holidays_in_year(&self, year: u16) -> Vec<Date> {
        calendars::holidays_in_year(self.rules(), year)
    }
}

impl Calendar for CalendarType {
    fn name(&self) -> &str {
        match self {
            CalendarType::None => "None",
            CalendarType::Weekend => "Weekend",
            CalendarType::Target => "TARGET",
            CalendarType::UnitedStates => "United States",
            CalendarType::UnitedKingdom => "United Kingdom",
            CalendarType::Germany => "Germany",
            CalendarType::Switzerland => "Switzerland",
            CalendarType::Canada => "Canada",
            CalendarType::Australia => "Australia",
            CalendarType::ChinaSse => "China (SSE)",
        }
    }

    fn is_weekend(&self, date: Date) -> bool {
        *self != CalendarType::None && date.weekday().is_weekend()
    }

    fn is_business_day(&self, date: Date) -> bool {
        if *self == CalendarType::None {
            return true;
        }
        !self.is_weekend(date) && !calendars::is_listed_holiday(self.rules(), date)
    }
}

impl std::str::FromStr for CalendarType {
    type Err = Error;

    /// Accepts names such as `WEEKEND`, `TARGET`, `US`, `UNITED_KINGDOM` or
    /// `CHINA_SSE`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        let cal = match key.as_str() {
            "NONE" | "NULL" => CalendarType::None,
            "WEEKEND" | "WEEKENDSONLY" => CalendarType::Weekend,
            "TARGET" | "EU" => CalendarType::Target,
            "US" | "USA" | "UNITEDSTATES" => CalendarType::UnitedStates,
            "UK" | "GB" | "UNITEDKINGDOM" => CalendarType::UnitedKingdom,
            "DE" | "GERMANY" => CalendarType::Germany,
            "CH" | "SWITZERLAND" => CalendarType::Switzerland,
            "CA" | "CANADA" => CalendarType::Canada,
            "AU" | "AUSTRALIA" => CalendarType::Australia,
            "CHINASSE" | "SSE" => CalendarType::ChinaSse,
            _ => return Err(Error::BadInput(format!("unknown calendar '{s}'"))),
        };
        Ok(cal)
    }
}

impl std::fmt::Display for CalendarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn none_calendar_always_business() {
        let cal = CalendarType::None;
        assert!(cal.is_business_day(date(2023, 12, 25)));
        assert!(cal.is_business_day(date(2023, 9, 2)));
    }

    #[test]
    fn weekend_adjustments() {
        let cal = CalendarType::Weekend;
        let sat = date(2023, 9, 2);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following), date(2023, 9, 4));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Preceding), date(2023, 9, 1));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Unadjusted), sat);
    }

    #[test]
    fn modified_conventions_stay_in_month() {
        let cal = CalendarType::Weekend;
        // 2023-09-30 is a Saturday.
        let d = date(2023, 9, 30);
        assert_eq!(
            cal.adjust(d, BusinessDayConvention::ModifiedFollowing),
            date(2023, 9, 29)
        );
        // 2023-10-01 is a Sunday.
        let d = date(2023, 10, 1);
        assert_eq!(
            cal.adjust(d, BusinessDayConvention::ModifiedPreceding),
            date(2023, 10, 2)
        );
    }

    #[test]
    fn business_day_counting() {
        let cal = CalendarType::Weekend;
        assert_eq!(cal.business_days_between(date(2023, 9, 4), date(2023, 9, 8)), 4);
        assert_eq!(cal.business_days_between(date(2023, 9, 8), date(2023, 9, 4)), -4);
        assert_eq!(cal.advance_business_days(date(2023, 9, 8), 1).unwrap(), date(2023, 9, 11));
        assert_eq!(cal.advance_business_days(date(2023, 9, 11), -1).unwrap(), date(2023, 9, 8));
        assert!(cal
            .advance_business_days(date(2023, 9, 11), i32::MIN)
            .unwrap_err()
            .is_bad_input());
    }

    #[test]
    fn month_end_business_day() {
        let cal = CalendarType::Weekend;
        assert_eq!(cal.end_of_month(date(2023, 9, 10)), date(2023, 9, 29));
        assert!(cal.is_end_of_month(date(2023, 9, 29)));
    }

    #[test]
    fn holiday_list_excludes_weekends() {
        let list = CalendarType::Target.holiday_list(date(2023, 12, 20), date(2024, 1, 5));
        assert_eq!(list, vec![date(2023, 12, 25), date(2023, 12, 26), date(2024, 1, 1)]);
    }

    #[test]
    fn parse_names() {
        assert_eq!("china_sse".parse::<CalendarType>().unwrap(), CalendarType::ChinaSse);
        assert_eq!("US".parse::<CalendarType>().unwrap(), CalendarType::UnitedStates);
        assert!("JAPAN".parse::<CalendarType>().unwrap_err().is_bad_input());
    }
}
