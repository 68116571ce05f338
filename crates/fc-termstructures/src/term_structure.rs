//! `TermStructure`: base trait for all curves.
//!
//! Every curve has a valuation date, at which time is zero, and a day count
//! converting dates into year fractions from that date.

use fc_core::Time;
use fc_time::{Date, DayCountType};

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which time is measured from.
    fn valuation_date(&self) -> Date;

    /// The day count used for date → time conversions.
    fn day_count(&self) -> DayCountType;

    /// Year fraction from the valuation date to `date`; negative before it.
    fn time_from_valuation(&self, date: Date) -> Time {
        self.day_count().year_fraction(self.valuation_date(), date)
    }
}

impl<T: TermStructure + ?Sized> TermStructure for std::sync::Arc<T> {
    fn valuation_date(&self) -> Date {
        (**self).valuation_date()
    }

    fn day_count(&self) -> DayCountType {
        (**self).day_count()
    }

    fn time_from_valuation(&self, date: Date) -> Time {
        (**self).time_from_valuation(date)
    }
}
