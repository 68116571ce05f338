//! `Date`: civil calendar date with an optional time of day.
//!
//! Dates are stored as a serial day number plus seconds since midnight.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900 (a Monday).
//! * The valid date range is 1900-01-01 to 2199-12-31.
//!
//! Ordering compares the serial first and the time of day second, so it
//! agrees with chronological order.

use crate::date_format::{self, DateFormat};
use crate::tenor::Tenor;
use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;
use fc_core::errors::{Error, Result};
use fc_core::{ensure, Real};

const SECONDS_PER_DAY: u32 = 86_400;

/// Serial number of 1900-01-01 relative to the proleptic civil epoch
/// 1970-01-01 used by [`days_from_civil`], plus one.
const EPOCH_SHIFT: i32 = 25_568;

/// A calendar date with an optional intraday time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    serial: i32,
    seconds: u32,
}

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date {
        serial: 1,
        seconds: 0,
    };

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date {
        serial: 109_573,
        seconds: 0,
    };

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number (1 = 1900-01-01).
    pub fn from_serial(serial: i32) -> Result<Self> {
        ensure!(
            (Self::MIN.serial..=Self::MAX.serial).contains(&serial),
            "serial {serial} outside [{}, {}]",
            Self::MIN.serial,
            Self::MAX.serial
        );
        Ok(Date { serial, seconds: 0 })
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        ensure!(
            (1900..=2199).contains(&year),
            "year {year} out of range [1900, 2199]"
        );
        ensure!(
            (1..=12).contains(&month),
            "month {month} out of range [1, 12]"
        );
        let last = days_in_month(year, month);
        ensure!(
            day >= 1 && day <= last,
            "day {day} out of range [1, {last}] for {year}-{month:02}"
        );
        Ok(Date {
            serial: serial_from_ymd(year, month, day),
            seconds: 0,
        })
    }

    /// Create a date with a time of day.
    pub fn from_ymd_hms(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self> {
        let date = Self::from_ymd(year, month, day)?;
        date.with_time(hour, minute, second)
    }

    /// Return the same day at the given time.
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self> {
        ensure!(hour < 24, "hour {hour} out of range [0, 23]");
        ensure!(minute < 60, "minute {minute} out of range [0, 59]");
        ensure!(second < 60, "second {second} out of range [0, 59]");
        Ok(Date {
            serial: self.serial,
            seconds: hour as u32 * 3600 + minute as u32 * 60 + second as u32,
        })
    }

    /// Drop the time of day.
    pub fn date_only(self) -> Self {
        Date {
            serial: self.serial,
            seconds: 0,
        }
    }

    /// Parse any supported rendering (ISO, UK/US long and longest, with an
    /// optional `HH:MM[:SS]` suffix).
    pub fn parse(s: &str) -> Result<Self> {
        date_format::parse_date(s)
    }

    /// Render in an explicit format, ignoring the per-thread default.
    pub fn format(&self, format: DateFormat) -> String {
        date_format::render(*self, format)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.serial
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.serial)
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let (y, _, _) = self.ymd();
        (self.serial - serial_from_ymd(y, 1, 1) + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        Weekday::ALL[(self.serial - 1).rem_euclid(7) as usize]
    }

    /// Hour of the intraday time.
    pub fn hour(&self) -> u8 {
        (self.seconds / 3600) as u8
    }

    /// Minute of the intraday time.
    pub fn minute(&self) -> u8 {
        (self.seconds % 3600 / 60) as u8
    }

    /// Second of the intraday time.
    pub fn second(&self) -> u8 {
        (self.seconds % 60) as u8
    }

    /// Seconds since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        self.seconds
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days, keeping the time of day.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self
            .serial
            .checked_add(n)
            .filter(|s| (Self::MIN.serial..=Self::MAX.serial).contains(s))
            .ok_or_else(|| {
                Error::BadInput(format!("date arithmetic: {self:?} + {n} days is out of range"))
            })?;
        Ok(Date {
            serial,
            seconds: self.seconds,
        })
    }

    /// Advance by `n` weekdays, skipping Saturdays and Sundays.
    ///
    /// A negative `n` moves backwards. Starting from a weekend day, the
    /// first step lands on the adjacent weekday.
    pub fn add_weekdays(self, n: i32) -> Result<Self> {
        let step = n.signum();
        let mut remaining = n.unsigned_abs();
        let mut date = self;
        while remaining > 0 {
            date = date.add_days(step)?;
            if date.weekday().is_weekday() {
                remaining -= 1;
            }
        }
        Ok(date)
    }

    /// Advance by `n` months, clamping the day to the length of the target
    /// month.
    pub fn add_months(self, n: i32) -> Result<Self> {
        let (y, m, d) = self.ymd();
        let total = (y as i32 * 12 + (m as i32 - 1)).checked_add(n).ok_or_else(|| {
            Error::BadInput(format!("date arithmetic: {self:?} + {n} months is out of range"))
        })?;
        let new_y = total.div_euclid(12);
        let new_m = (total.rem_euclid(12) + 1) as u8;
        ensure!(
            (1900..=2199).contains(&new_y),
            "date arithmetic: {self:?} + {n} months is out of range"
        );
        let new_y = new_y as u16;
        let new_d = d.min(days_in_month(new_y, new_m));
        Ok(Date {
            serial: serial_from_ymd(new_y, new_m, new_d),
            seconds: self.seconds,
        })
    }

    /// Advance by `years`.
    ///
    /// Whole numbers of years use month arithmetic. Fractional years are
    /// converted to `round(365 · years)` calendar days.
    pub fn add_years(self, years: Real) -> Result<Self> {
        ensure!(years.is_finite(), "non-finite year offset {years}");
        if years.fract() == 0.0 {
            ensure!(
                years.abs() <= 400.0,
                "year offset {years} out of range"
            );
            self.add_months(years as i32 * 12)
        } else {
            self.add_days((365.0 * years).round() as i32)
        }
    }

    /// [`add_years`](Self::add_years) over a sequence of offsets.
    pub fn add_years_many(self, years: &[Real]) -> Result<Vec<Self>> {
        years.iter().map(|&y| self.add_years(y)).collect()
    }

    /// Advance by `n` units of time.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        let scaled = |factor: i32| {
            n.checked_mul(factor).ok_or_else(|| {
                Error::BadInput(format!("date arithmetic: {n} {unit} is out of range"))
            })
        };
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => self.add_days(scaled(7)?),
            TimeUnit::Months => self.add_months(n),
            TimeUnit::Years => self.add_months(scaled(12)?),
        }
    }

    /// Advance by a [`Tenor`].
    pub fn add_period(self, tenor: Tenor) -> Result<Self> {
        self.advance(tenor.length, tenor.unit)
    }

    /// Advance by a tenor string such as `"3M"`, `"10Y"` or `"-1W"`.
    pub fn add_tenor(self, tenor: &str) -> Result<Self> {
        self.add_period(Tenor::parse(tenor)?)
    }

    /// [`add_tenor`](Self::add_tenor) over a sequence of tenor strings.
    pub fn add_tenors(self, tenors: &[&str]) -> Result<Vec<Self>> {
        tenors.iter().map(|t| self.add_tenor(t)).collect()
    }

    /// Number of calendar days from `self` to `other`, ignoring the time of
    /// day. Positive if `other` is later.
    pub fn days_between(self, other: Date) -> i32 {
        other.serial - self.serial
    }

    /// Return the last day of the month containing this date.
    pub fn eom(self) -> Self {
        let (y, m, _) = self.ymd();
        Date {
            serial: serial_from_ymd(y, m, days_in_month(y, m)),
            seconds: self.seconds,
        }
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_eom(self) -> bool {
        self.serial == self.eom().serial
    }

    /// The 20th of the next March, June, September or December falling at
    /// least `n_months` after this date.
    ///
    /// A date already on or past the 20th of a quarter month rolls to the
    /// following quarter.
    pub fn next_cds_date(self, n_months: i32) -> Result<Self> {
        let shifted = self.add_months(n_months)?;
        let (y, m, d) = shifted.ymd();
        let (y, m) = if m % 3 == 0 && d < 20 {
            (y as i32, m as i32)
        } else {
            roll_to_next_quarter_month(y, m)
        };
        ensure!(y <= 2199, "next CDS date after {self:?} is out of range");
        Self::from_ymd(y as u16, m as u8, 20)
    }

    /// The third Wednesday of the next March, June, September or December
    /// strictly after this date.
    pub fn next_imm_date(self) -> Result<Self> {
        let (y, m, _) = self.ymd();
        if m % 3 == 0 {
            let candidate = Self::nth_weekday(3, Weekday::Wednesday, y, m)?;
            if candidate.serial > self.serial {
                return Ok(candidate);
            }
        }
        let (y, m) = roll_to_next_quarter_month(y, m);
        ensure!(y <= 2199, "next IMM date after {self:?} is out of range");
        Self::nth_weekday(3, Weekday::Wednesday, y as u16, m as u8)
    }

    /// Return the `n`-th occurrence of `weekday` in the given month.
    ///
    /// `nth_weekday(3, Weekday::Wednesday, 2024, 3)` is 2024-03-20.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        ensure!(n >= 1, "nth_weekday: n must be >= 1");
        let first = Date::from_ymd(year, month, 1)?;
        let offset =
            (weekday.ordinal() as i32 - first.weekday().ordinal() as i32).rem_euclid(7) as u8;
        let day = 1 + offset + 7 * (n - 1);
        ensure!(
            day <= days_in_month(year, month),
            "nth_weekday: there is no {n}-th {weekday} in {year}-{month:02}"
        );
        Date::from_ymd(year, month, day)
    }

    /// Return the last occurrence of `weekday` in the given month.
    pub fn last_weekday(weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        let last = Date::from_ymd(year, month, days_in_month(year, month))?;
        let back = (last.weekday().ordinal() as i32 - weekday.ordinal() as i32).rem_euclid(7);
        last.add_days(-back)
    }
}

fn roll_to_next_quarter_month(year: u16, month: u8) -> (i32, i32) {
    let next = (month as i32 / 3 + 1) * 3;
    if next > 12 {
        (year as i32 + 1, next - 12)
    } else {
        (year as i32, next)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

/// # Panics
/// Panics if the result leaves the supported range. Use
/// [`Date::add_days`] for checked arithmetic.
impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition out of range")
    }
}

/// # Panics
/// Panics if the result leaves the supported range.
impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction out of range")
    }
}

/// Fractional days between two dates, including the intraday part.
impl std::ops::Sub<Date> for Date {
    type Output = Real;
    fn sub(self, rhs: Date) -> Real {
        (self.serial - rhs.serial) as Real
            + (self.seconds as Real - rhs.seconds as Real) / SECONDS_PER_DAY as Real
    }
}

impl std::str::FromStr for Date {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

/// Renders in the calling thread's active [`DateFormat`].
impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(date_format::date_format()))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.format(DateFormat::Iso))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format(DateFormat::Iso))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Date::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i32, month: i32, day: i32) -> i32 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    days_from_civil(year as i32, month as i32, day as i32) + EPOCH_SHIFT
}

fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let z = serial - EPOCH_SHIFT + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i32::from(month <= 2);
    (year as u16, month as u8, day as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
