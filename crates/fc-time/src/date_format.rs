//! Date renderings and the per-thread default format.
//!
//! `Display` for [`Date`] follows the calling thread's active
//! [`DateFormat`]. Parsing accepts every format regardless of the active one.

use crate::date::Date;
use crate::weekday::Weekday;
use fc_core::errors::{Error, Result};
use fc_core::{ensure, fail};
use std::cell::Cell;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// How dates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateFormat {
    /// `23-AUG-2020`
    UkLong,
    /// `SUN 23 AUG 2020`
    UkLongest,
    /// `AUG-23-2020`
    UsLong,
    /// `SUN AUG 23 2020`
    UsLongest,
    /// `2020-08-23`
    #[default]
    Iso,
}

thread_local! {
    static ACTIVE: Cell<DateFormat> = const { Cell::new(DateFormat::Iso) };
}

/// The calling thread's active format.
pub fn date_format() -> DateFormat {
    ACTIVE.with(Cell::get)
}

/// Set the calling thread's active format and return the previous one.
pub fn set_date_format(format: DateFormat) -> DateFormat {
    ACTIVE.with(|c| c.replace(format))
}

/// Sets the active format for its lifetime and restores the previous one on
/// drop.
#[must_use = "the format reverts as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopedDateFormat {
    previous: DateFormat,
}

impl ScopedDateFormat {
    /// Activate `format` on the calling thread.
    pub fn new(format: DateFormat) -> Self {
        Self {
            previous: set_date_format(format),
        }
    }
}

impl Drop for ScopedDateFormat {
    fn drop(&mut self) {
        set_date_format(self.previous);
    }
}

pub(crate) fn render(date: Date, format: DateFormat) -> String {
    let (y, m, d) = date.ymd();
    let mon = MONTHS[m as usize - 1];
    let wd = date.weekday().short_name();
    let mut out = match format {
        DateFormat::UkLong => format!("{d:02}-{mon}-{y}"),
        DateFormat::UkLongest => format!("{wd} {d:02} {mon} {y}"),
        DateFormat::UsLong => format!("{mon}-{d:02}-{y}"),
        DateFormat::UsLongest => format!("{wd} {mon} {d:02} {y}"),
        DateFormat::Iso => format!("{y:04}-{m:02}-{d:02}"),
    };
    if date.seconds_of_day() != 0 {
        out.push_str(&format!(
            " {:02}:{:02}:{:02}",
            date.hour(),
            date.minute(),
            date.second()
        ));
    }
    out
}

pub(crate) fn parse_date(input: &str) -> Result<Date> {
    let s = input.trim();
    let bad = || Error::BadInput(format!("malformed date '{input}'"));
    let (date_part, time_part) = split_time(s);

    let tokens: Vec<&str> = date_part
        .split(|c: char| c == '-' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    let numeric = |t: &str| t.bytes().all(|b| b.is_ascii_digit());

    let (weekday, y, m, d) = match tokens.as_slice() {
        [y, m, d] if numeric(y) && numeric(m) && numeric(d) && y.len() == 4 => {
            (None, num(y)?, num(m)?, num(d)?)
        }
        [d, mon, y] if numeric(d) && numeric(y) => (None, num(y)?, month(mon)?, num(d)?),
        [mon, d, y] if numeric(d) && numeric(y) => (None, num(y)?, month(mon)?, num(d)?),
        [wd, d, mon, y] if numeric(d) && numeric(y) => {
            (Some(*wd), num(y)?, month(mon)?, num(d)?)
        }
        [wd, mon, d, y] if numeric(d) && numeric(y) => {
            (Some(*wd), num(y)?, month(mon)?, num(d)?)
        }
        _ => return Err(bad()),
    };
    let year = u16::try_from(y).map_err(|_| bad())?;
    let month = u8::try_from(m).map_err(|_| bad())?;
    let day = u8::try_from(d).map_err(|_| bad())?;
    let mut date = Date::from_ymd(year, month, day)?;

    if let Some(wd) = weekday {
        let parsed = Weekday::from_short_name(wd).ok_or_else(bad)?;
        ensure!(
            parsed == date.weekday(),
            "'{input}': {year}-{month:02}-{day:02} is a {}, not {wd}",
            date.weekday()
        );
    }
    if let Some(t) = time_part {
        let fields: Vec<&str> = t.split(':').collect();
        let (h, mi, sec) = match fields.as_slice() {
            [h, mi] => (num(h)?, num(mi)?, 0),
            [h, mi, sec] => (num(h)?, num(mi)?, num(sec)?),
            _ => return Err(bad()),
        };
        let narrow = |v: u32| u8::try_from(v).map_err(|_| bad());
        date = date.with_time(narrow(h)?, narrow(mi)?, narrow(sec)?)?;
    }
    Ok(date)
}

/// Split a trailing `HH:MM[:SS]` off at the last space or `T` before the
/// first colon.
fn split_time(s: &str) -> (&str, Option<&str>) {
    match s.find(':') {
        Some(colon) => match s[..colon].rfind(|c: char| c == ' ' || c == 'T' || c == 't') {
            Some(sep) => (s[..sep].trim_end(), Some(s[sep + 1..].trim())),
            None => (s, None),
        },
        None => (s, None),
    }
}

fn num(token: &str) -> Result<u32> {
    match token.parse::<u32>() {
        Ok(v) => Ok(v),
        Err(_) => fail!("expected a number, found '{token}'"),
    }
}

fn month(token: &str) -> Result<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| Error::BadInput(format!("unknown month '{token}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn renders_every_format() {
        let d = date(2020, 8, 23);
        assert_eq!(d.format(DateFormat::UkLong), "23-AUG-2020");
        assert_eq!(d.format(DateFormat::UkLongest), "SUN 23 AUG 2020");
        assert_eq!(d.format(DateFormat::UsLong), "AUG-23-2020");
        assert_eq!(d.format(DateFormat::UsLongest), "SUN AUG 23 2020");
        assert_eq!(d.format(DateFormat::Iso), "2020-08-23");
    }

    #[test]
    fn parses_every_format() {
        let d = date(2020, 8, 23);
        for s in [
            "23-AUG-2020",
            "SUN 23 AUG 2020",
            "AUG-23-2020",
            "sun aug 23 2020",
            "2020-08-23",
        ] {
            assert_eq!(Date::parse(s).unwrap(), d, "{s}");
        }
    }

    #[test]
    fn parses_time_of_day() {
        let d = Date::parse("2020-08-23T10:30:15").unwrap();
        assert_eq!((d.hour(), d.minute(), d.second()), (10, 30, 15));
        let d = Date::parse("23-AUG-2020 10:30").unwrap();
        assert_eq!((d.hour(), d.minute()), (10, 30));
        assert_eq!(d.format(DateFormat::Iso), "2020-08-23 10:30:00");
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "2020-13-01", "MON 23 AUG 2020", "23-XYZ-2020", "2020/08", "10:30"] {
            assert!(Date::parse(s).unwrap_err().is_bad_input(), "{s}");
        }
    }

    #[test]
    fn scoped_format_restores() {
        let d = date(2020, 8, 23);
        assert_eq!(d.to_string(), "2020-08-23");
        {
            let _fmt = ScopedDateFormat::new(DateFormat::UkLong);
            assert_eq!(d.to_string(), "23-AUG-2020");
        }
        assert_eq!(d.to_string(), "2020-08-23");
    }
}
