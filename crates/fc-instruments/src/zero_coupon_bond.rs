//! Zero-coupon bond.

use fc_core::{ensure, Real, Result};
use fc_time::Date;

use crate::instrument::{Instrument, Priceable};
use crate::market::RatesMarket;

/// Pays `face` at maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZeroCouponBond {
    maturity: Date,
    face: Real,
}

impl ZeroCouponBond {
    /// # Errors
    /// `BadInput` for a non-finite face amount.
    pub fn new(maturity: Date, face: Real) -> Result<Self> {
        ensure!(face.is_finite(), "face amount must be finite, got {face}");
        Ok(Self { maturity, face })
    }

    /// Redemption amount.
    pub fn face(&self) -> Real {
        self.face
    }
}

impl Instrument for ZeroCouponBond {
    fn maturity_date(&self) -> Date {
        self.maturity
    }
}

impl Priceable for ZeroCouponBond {
    type Market = RatesMarket;

    /// `face · D(maturity)`, zero once matured.
    fn price(&self, market: &RatesMarket) -> Result<Real> {
        if self.is_expired(market.valuation_date()) {
            return Ok(0.0);
        }
        Ok(self.face * market.effective_curve()?.df(self.maturity))
    }
}
