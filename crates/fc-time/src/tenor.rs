//! `Tenor`: a signed span of days, weeks, months or years.
//!
//! Grammar: `<sign?><integer><unit>` with unit one of `D`, `W`, `M`, `Y`,
//! case-insensitive. Whitespace is tolerated around every element.

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;
use fc_core::errors::{Error, Result};
use fc_core::fail;

/// A time span made up of an integer length and a [`TimeUnit`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tenor {
    /// Number of units. Negative tenors move backwards.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Tenor {
    /// Create a new tenor.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Parse a tenor string such as `"3M"`, `"-1w"` or `" 10 Y"`.
    pub fn parse(input: &str) -> Result<Self> {
        let bad = || Error::BadInput(format!("malformed tenor '{input}'"));
        let s = input.trim();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, s[1..].trim_start()),
            Some(b'+') => (false, s[1..].trim_start()),
            _ => (false, s),
        };
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(bad)?;
        if digits_end == 0 {
            return Err(bad());
        }
        let magnitude: i32 = rest[..digits_end].parse().map_err(|_| bad())?;
        let mut unit_chars = rest[digits_end..].trim().chars();
        let unit = match (unit_chars.next(), unit_chars.next()) {
            (Some(c), None) => TimeUnit::from_letter(c).ok_or_else(bad)?,
            _ => return Err(bad()),
        };
        let length = if negative { -magnitude } else { magnitude };
        Ok(Self { length, unit })
    }

    /// The tenor of one period of `freq`.
    ///
    /// # Errors
    /// Returns `BadInput` for [`Frequency::Once`], which has no period.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        match freq {
            Frequency::Once => fail!("{freq} has no tenor"),
            Frequency::Weekly => Ok(Tenor::new(1, TimeUnit::Weeks)),
            other => Ok(Tenor::new(other.months() as i32, TimeUnit::Months)),
        }
    }

    /// Length in whole months, if the unit is months or years and the
    /// count fits in an `i32`.
    pub fn months(&self) -> Option<i32> {
        match self.unit {
            TimeUnit::Months => Some(self.length),
            TimeUnit::Years => self.length.checked_mul(12),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }
}

impl std::str::FromStr for Tenor {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::ops::Neg for Tenor {
    type Output = Self;
    fn neg(self) -> Self {
        Tenor {
            length: -self.length,
            unit: self.unit,
        }
    }
}

impl std::ops::Mul<i32> for Tenor {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Tenor {
            length: self.length * rhs,
            unit: self.unit,
        }
    }
}

impl std::fmt::Display for Tenor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit.letter())
    }
}

impl std::fmt::Debug for Tenor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tenor({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_grammar() {
        assert_eq!(Tenor::parse("3M").unwrap(), Tenor::new(3, TimeUnit::Months));
        assert_eq!(Tenor::parse("10y").unwrap(), Tenor::new(10, TimeUnit::Years));
        assert_eq!(Tenor::parse(" - 1 W ").unwrap(), Tenor::new(-1, TimeUnit::Weeks));
        assert_eq!(Tenor::parse("0D").unwrap(), Tenor::new(0, TimeUnit::Days));
    }

    #[test]
    fn parse_rejects_malformed() {
        for s in ["", "M", "3", "3MM", "3X", "--3M", "3.5Y", "Y3"] {
            assert!(Tenor::parse(s).unwrap_err().is_bad_input(), "{s}");
        }
    }

    #[test]
    fn display_and_negation() {
        assert_eq!(Tenor::new(3, TimeUnit::Months).to_string(), "3M");
        assert_eq!((-Tenor::new(6, TimeUnit::Months)).to_string(), "-6M");
        assert_eq!((Tenor::new(1, TimeUnit::Years) * 5).months(), Some(60));
    }

    #[test]
    fn from_frequency() {
        assert_eq!(
            Tenor::from_frequency(Frequency::Quarterly).unwrap(),
            Tenor::new(3, TimeUnit::Months)
        );
        assert!(Tenor::from_frequency(Frequency::Once).is_err());
    }
}
