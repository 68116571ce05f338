//! Units a tenor is counted in.

/// Unit of a [`Tenor`](crate::Tenor). Weeks are seven days and years are
/// twelve months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    const LETTERS: [(char, TimeUnit); 4] = [
        ('D', TimeUnit::Days),
        ('W', TimeUnit::Weeks),
        ('M', TimeUnit::Months),
        ('Y', TimeUnit::Years),
    ];

    /// `D`, `W`, `M` or `Y`, in either case.
    pub fn from_letter(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        Self::LETTERS.iter().find(|(l, _)| *l == c).map(|&(_, unit)| unit)
    }

    /// Upper-case tenor letter.
    pub fn letter(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
