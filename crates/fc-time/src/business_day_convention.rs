//! Business-day convention.

use fc_core::errors::{Error, Result};

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// Do not adjust (keep the original date).
    Unadjusted,
    /// Choose the first business day on or after the given date.
    #[default]
    Following,
    /// Choose the first business day on or after the given date unless it
    /// belongs to a different month; in that case choose the first business
    /// day before it.
    ModifiedFollowing,
    /// Choose the first business day on or before the given date.
    Preceding,
    /// Choose the first business day on or before the given date unless it
    /// belongs to a different month; in that case choose the first business
    /// day after it.
    ModifiedPreceding,
}

impl BusinessDayConvention {
    /// All conventions, in declaration order.
    pub const ALL: [BusinessDayConvention; 5] = [
        BusinessDayConvention::Unadjusted,
        BusinessDayConvention::Following,
        BusinessDayConvention::ModifiedFollowing,
        BusinessDayConvention::Preceding,
        BusinessDayConvention::ModifiedPreceding,
    ];
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = Error;

    /// Accepts `NONE`/`UNADJUSTED`, `FOLLOWING`, `MODIFIED_FOLLOWING`,
    /// `PRECEDING` and `MODIFIED_PRECEDING` in any case and spacing.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "NONE" | "UNADJUSTED" => Ok(Self::Unadjusted),
            "FOLLOWING" | "F" => Ok(Self::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(Self::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(Self::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(Self::ModifiedPreceding),
            _ => Err(Error::BadInput(format!(
                "unknown business-day convention '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{s}")
    }
}
