//! Instrument base traits and the pricing-result record.
//!
//! Instruments are plain records. Pricing is a function of the instrument
//! and a market; each instrument names the market type it prices against
//! through [`Priceable::Market`].

use std::collections::HashMap;

use fc_core::{Real, Result};
use fc_time::Date;

/// Results of pricing an instrument: the NPV plus named extras
/// (leg values, analytic Greeks, par rates, ...).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResults {
    /// Net present value.
    pub npv: Real,
    /// Additional named results.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Results holding just an NPV.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            additional_results: HashMap::new(),
        }
    }

    /// Add a named result.
    #[must_use]
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result.
    pub fn get(&self, key: &str) -> Option<Real> {
        self.additional_results.get(key).copied()
    }
}

/// A financial product with a final date.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// The last date on which the instrument pays or exercises.
    fn maturity_date(&self) -> Date;

    /// Whether the instrument has matured as of `valuation`.
    fn is_expired(&self, valuation: Date) -> bool {
        self.maturity_date() <= valuation
    }
}

/// Something with a price against a market of type `Self::Market`.
pub trait Priceable {
    /// The market data the pricer reads.
    type Market;

    /// Present value against `market`, honouring any active
    /// [`PricingContext`](fc_core::PricingContext) overrides the instrument
    /// consults.
    fn price(&self, market: &Self::Market) -> Result<Real>;
}

/// A market snapshot anchored at a valuation date.
pub trait MarketState: Sized {
    /// The valuation date.
    fn valuation_date(&self) -> Date;

    /// The same market observed at `date`.
    fn with_valuation_date(&self, date: Date) -> Result<Self>;
}
