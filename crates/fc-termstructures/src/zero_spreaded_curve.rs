//! `ZeroSpreadedCurve`: a base curve shifted by a continuous zero spread.

use std::sync::Arc;

use fc_core::{DiscountFactor, Rate, Spread, Time};
use fc_time::{Date, DayCountType};

use crate::discount_curve::DiscountCurve;
use crate::term_structure::TermStructure;

/// `D'(t) = D(t)·exp(−spread·t)` over a shared base curve.
#[derive(Debug, Clone)]
pub struct ZeroSpreadedCurve {
    base: Arc<dyn DiscountCurve>,
    spread: Spread,
}

impl ZeroSpreadedCurve {
    /// Shift `base` by `spread` (continuously compounded).
    pub fn new(base: Arc<dyn DiscountCurve>, spread: Spread) -> Self {
        Self { base, spread }
    }

    /// The unshifted curve.
    pub fn base(&self) -> &Arc<dyn DiscountCurve> {
        &self.base
    }

    /// The applied spread.
    pub fn spread(&self) -> Spread {
        self.spread
    }
}

impl TermStructure for ZeroSpreadedCurve {
    fn valuation_date(&self) -> Date {
        self.base.valuation_date()
    }

    fn day_count(&self) -> DayCountType {
        self.base.day_count()
    }
}

impl DiscountCurve for ZeroSpreadedCurve {
    fn df_time(&self, t: Time) -> DiscountFactor {
        self.base.df_time(t) * (-self.spread * t).exp()
    }

    fn instantaneous_forward(&self, t: Time) -> Option<Rate> {
        self.base.instantaneous_forward(t).map(|f| f + self.spread)
    }
}
