//! Day-count conventions.
//!
//! A day count computes the **year fraction** between two dates used when
//! discounting or accruing interest. Every convention is a pure function of
//! its inputs.

use crate::date::{is_leap_year, Date};
use crate::frequency::Frequency;
use fc_core::errors::{Error, Result};
use fc_core::{ensure, Time};

/// A convention for counting the fraction of a year between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountType {
    /// 30/360 bond basis.
    Thirty360Bond,
    /// 30E/360 (Eurobond basis).
    Thirty360E,
    /// 30E/360 ISDA.
    Thirty360EIsda,
    /// 30E+/360.
    Thirty360EPlus,
    /// Actual/Actual ISDA.
    ActActIsda,
    /// Actual/Actual ICMA; needs a reference period end and a frequency.
    ActActIcma,
    /// Actual/365 (Fixed).
    #[default]
    Act365F,
    /// Actual/360.
    Act360,
    /// Actual/365L.
    Act365L,
}

impl DayCountType {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountType::Thirty360Bond => "30/360",
            DayCountType::Thirty360E => "30E/360",
            DayCountType::Thirty360EIsda => "30E/360 ISDA",
            DayCountType::Thirty360EPlus => "30E+/360",
            DayCountType::ActActIsda => "ACT/ACT ISDA",
            DayCountType::ActActIcma => "ACT/ACT ICMA",
            DayCountType::Act365F => "ACT/365F",
            DayCountType::Act360 => "ACT/360",
            DayCountType::Act365L => "ACT/365L",
        }
    }

    /// Whether [`year_frac`](Self::year_frac) needs a reference date and a
    /// frequency.
    pub fn needs_reference_period(&self) -> bool {
        matches!(self, DayCountType::ActActIcma)
    }

    /// Year fraction and day count between `d1` and `d2`.
    ///
    /// * `d3` is the end of the reference (coupon) period. ACT/ACT ICMA
    ///   requires it; ACT/365L uses it when given and `d2` otherwise.
    /// * `freq` is the coupon frequency, required by ACT/ACT ICMA.
    /// * `is_termination_date` marks `d2` as the final date of a schedule,
    ///   which matters for 30E/360 ISDA in February.
    pub fn year_frac(
        &self,
        d1: Date,
        d2: Date,
        d3: Option<Date>,
        freq: Option<Frequency>,
        is_termination_date: bool,
    ) -> Result<(Time, i32)> {
        let actual = d1.days_between(d2);
        let thirty = |days: i32| Ok((days as Time / 360.0, days));
        match self {
            DayCountType::Act365F => Ok((actual as Time / 365.0, actual)),
            DayCountType::Act360 => Ok((actual as Time / 360.0, actual)),
            DayCountType::ActActIsda => Ok((act_act_isda(d1, d2), actual)),
            DayCountType::ActActIcma => {
                let d3 = d3.ok_or_else(|| {
                    Error::BadInput("ACT/ACT ICMA needs a reference period end".into())
                })?;
                let freq = freq.ok_or_else(|| {
                    Error::BadInput("ACT/ACT ICMA needs a coupon frequency".into())
                })?;
                let periods = freq.periods_per_year();
                let reference = d1.days_between(d3);
                ensure!(periods > 0, "ACT/ACT ICMA needs a periodic frequency, got {freq}");
                ensure!(reference > 0, "ACT/ACT ICMA reference end {d3:?} not after {d1:?}");
                Ok((
                    actual as Time / (reference as Time * periods as Time),
                    actual,
                ))
            }
            DayCountType::Act365L => {
                let d3 = d3.unwrap_or(d2);
                let leap = if freq == Some(Frequency::Annual) {
                    contains_feb_29(d1, d3)
                } else {
                    is_leap_year(d3.year())
                };
                let denom = if leap { 366.0 } else { 365.0 };
                Ok((actual as Time / denom, actual))
            }
            DayCountType::Thirty360Bond => {
                let (y1, m1, mut dd1) = ymd_i32(d1);
                let (y2, m2, mut dd2) = ymd_i32(d2);
                if dd1 == 31 {
                    dd1 = 30;
                }
                if dd2 == 31 && dd1 == 30 {
                    dd2 = 30;
                }
                thirty(days_360(y1, m1, dd1, y2, m2, dd2))
            }
            DayCountType::Thirty360E => {
                let (y1, m1, dd1) = ymd_i32(d1);
                let (y2, m2, dd2) = ymd_i32(d2);
                thirty(days_360(y1, m1, dd1.min(30), y2, m2, dd2.min(30)))
            }
            DayCountType::Thirty360EIsda => {
                let (y1, m1, mut dd1) = ymd_i32(d1);
                let (y2, m2, mut dd2) = ymd_i32(d2);
                if d1.is_eom() {
                    dd1 = 30;
                }
                if d2.is_eom() && !(is_termination_date && m2 == 2) {
                    dd2 = 30;
                }
                thirty(days_360(y1, m1, dd1, y2, m2, dd2))
            }
            DayCountType::Thirty360EPlus => {
                let (y1, m1, dd1) = ymd_i32(d1);
                let (y2, mut m2, mut dd2) = ymd_i32(d2);
                if dd2 == 31 {
                    dd2 = 1;
                    m2 += 1;
                }
                thirty(days_360(y1, m1, dd1.min(30), y2, m2, dd2))
            }
        }
    }

    /// `BadInput` for ACT/ACT ICMA, which cannot price a period on its own.
    ///
    /// Curves, rates and instruments call this when they are built, so that
    /// [`year_fraction`](Self::year_fraction) only ever sees conventions
    /// that need no reference period.
    pub fn ensure_standalone(&self) -> Result<()> {
        ensure!(
            !self.needs_reference_period(),
            "{} needs a reference period and coupon frequency; it cannot be used as a curve or accrual day count",
            self.name()
        );
        Ok(())
    }

    /// Year fraction between `d1` and `d2` with no reference period.
    ///
    /// ACT/ACT ICMA is rejected by [`ensure_standalone`](Self::ensure_standalone)
    /// wherever a day count is configured. Called directly, it logs a warning
    /// and returns the ACT/ACT ISDA fraction; use
    /// [`year_frac`](Self::year_frac) with a reference period instead.
    pub fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        match self.year_frac(d1, d2, None, None, false) {
            Ok((alpha, _)) => alpha,
            Err(err) => {
                fc_core::numerical_warning!(
                    day_count = self.name(),
                    "{err}; using the ACT/ACT ISDA year fraction"
                );
                act_act_isda(d1, d2)
            }
        }
    }

    /// Day count between `d1` and `d2` under this convention. ACT/ACT ICMA
    /// counts actual days.
    pub fn day_count(&self, d1: Date, d2: Date) -> i32 {
        self.year_frac(d1, d2, None, None, false)
            .map_or_else(|_| d1.days_between(d2), |(_, days)| days)
    }
}

fn ymd_i32(d: Date) -> (i32, i32, i32) {
    let (y, m, dd) = d.ymd();
    (y as i32, m as i32, dd as i32)
}

fn days_360(y1: i32, m1: i32, d1: i32, y2: i32, m2: i32, d2: i32) -> i32 {
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

fn act_act_isda(d1: Date, d2: Date) -> Time {
    if d1 == d2 {
        return 0.0;
    }
    if d2 < d1 {
        return -act_act_isda(d2, d1);
    }
    let (y1, y2) = (d1.year(), d2.year());
    let basis = |y: u16| if is_leap_year(y) { 366.0 } else { 365.0 };
    let start_of = |y: u16| Date::from_ymd(y, 1, 1).map(|d| d.serial()).unwrap_or(Date::MAX.serial() + 1);
    if y1 == y2 {
        return d1.days_between(d2) as Time / basis(y1);
    }
    let first = (start_of(y1 + 1) - d1.serial()) as Time / basis(y1);
    let last = (d2.serial() - start_of(y2)) as Time / basis(y2);
    first + (y2 - y1 - 1) as Time + last
}

/// Whether 29 February lies in `(start, end]`.
fn contains_feb_29(start: Date, end: Date) -> bool {
    (start.year()..=end.year())
        .filter(|&y| is_leap_year(y))
        .filter_map(|y| Date::from_ymd(y, 2, 29).ok())
        .any(|feb29| feb29 > start.date_only() && feb29 <= end.date_only())
}

impl std::str::FromStr for DayCountType {
    type Err = Error;

    /// Accepts common spellings such as `ACT/360`, `ACT_365F`, `30E/360 ISDA`
    /// or `THIRTY360_BOND`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
            .collect::<String>()
            .to_ascii_uppercase()
            .replace("THIRTY", "30")
            .replace("ACTUAL", "ACT");
        let dc = match key.as_str() {
            "30360" | "30360BOND" | "30360US" | "BONDBASIS" => DayCountType::Thirty360Bond,
            "30E360" | "EUROBOND" => DayCountType::Thirty360E,
            "30E360ISDA" => DayCountType::Thirty360EIsda,
            "30E+360" | "30EPLUS360" | "30360EPLUS" => DayCountType::Thirty360EPlus,
            "ACTACT" | "ACTACTISDA" => DayCountType::ActActIsda,
            "ACTACTICMA" | "ACTACTISMA" => DayCountType::ActActIcma,
            "ACT365" | "ACT365F" | "ACT365FIXED" => DayCountType::Act365F,
            "ACT360" => DayCountType::Act360,
            "ACT365L" => DayCountType::Act365L,
            "30360E" => DayCountType::Thirty360E,
            "30360EISDA" => DayCountType::Thirty360EIsda,
            _ => return Err(Error::BadInput(format!("unknown day count '{s}'"))),
        };
        Ok(dc)
    }
}

impl std::fmt::Display for DayCountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
