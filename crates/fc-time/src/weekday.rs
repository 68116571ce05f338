//! Days of the week, Monday first.

/// Day of the week, numbered ISO-style from Monday = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Sunday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    const ABBREVIATIONS: [&'static str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        *self >= Weekday::Saturday
    }

    /// Monday to Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// 1 for Monday up to 7 for Sunday.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// `MON`, `TUE`, ... as rendered by the long date formats.
    pub fn short_name(&self) -> &'static str {
        Self::ABBREVIATIONS[usize::from(self.ordinal() - 1)]
    }

    /// Parse a three-letter abbreviation, ignoring case.
    pub fn from_short_name(s: &str) -> Option<Self> {
        Self::ABBREVIATIONS
            .iter()
            .zip(Self::ALL)
            .find_map(|(abbr, day)| abbr.eq_ignore_ascii_case(s.trim()).then_some(day))
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_short_name(day.short_name()), Some(day));
        }
        assert_eq!(Weekday::from_short_name("sat"), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_short_name("Sunday"), None);
        assert_eq!(Weekday::Sunday.ordinal(), 7);
        assert!(Weekday::Sunday.is_weekend() && Weekday::Friday.is_weekday());
    }
}
