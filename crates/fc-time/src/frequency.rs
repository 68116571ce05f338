//! `Frequency`: how often coupons or resets recur.

use fc_core::errors::{Error, Result};

/// Coupon or reset frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Once (maturity only).
    Once,
    /// 1 per year.
    Annual,
    /// 2 per year.
    Semiannual,
    /// Every fourth month (three times per year).
    EveryFourthMonth,
    /// 4 per year.
    Quarterly,
    /// 6 per year.
    Bimonthly,
    /// 12 per year.
    Monthly,
    /// 52 per year.
    Weekly,
}

impl Frequency {
    /// Number of periods per year; zero for [`Frequency::Once`].
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Once => 0,
            Frequency::Annual => 1,
            Frequency::Semiannual => 2,
            Frequency::EveryFourthMonth => 3,
            Frequency::Quarterly => 4,
            Frequency::Bimonthly => 6,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
        }
    }

    /// Period length in months; zero for `Once` and `Weekly`.
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Once | Frequency::Weekly => 0,
            other => 12 / other.periods_per_year(),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = Error;

    /// Accepts the variant names and common aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        let freq = match key.as_str() {
            "ONCE" => Frequency::Once,
            "ANNUAL" | "1Y" => Frequency::Annual,
            "SEMIANNUAL" | "6M" => Frequency::Semiannual,
            "EVERYFOURTHMONTH" | "4M" => Frequency::EveryFourthMonth,
            "QUARTERLY" | "3M" => Frequency::Quarterly,
            "BIMONTHLY" | "2M" => Frequency::Bimonthly,
            "MONTHLY" | "1M" => Frequency::Monthly,
            "WEEKLY" | "1W" => Frequency::Weekly,
            _ => return Err(Error::BadInput(format!("unknown frequency '{s}'"))),
        };
        Ok(freq)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::Weekly => "Weekly",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_per_period() {
        assert_eq!(Frequency::Semiannual.months(), 6);
        assert_eq!(Frequency::EveryFourthMonth.months(), 4);
        assert_eq!(Frequency::Weekly.periods_per_year(), 52);
    }

    #[test]
    fn parse_names() {
        assert_eq!("semi_annual".parse::<Frequency>().unwrap(), Frequency::Semiannual);
        assert_eq!("QUARTERLY".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert!("fortnightly".parse::<Frequency>().unwrap_err().is_bad_input());
    }
}
