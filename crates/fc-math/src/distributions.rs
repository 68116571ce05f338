//! Standard normal distribution.
//!
//! The cumulative distribution goes through `statrs`' complementary error
//! function. Absolute error stays below `1e-10` near the centre, and the
//! lower tail is computed directly rather than as `1 − Φ(−x)`, so far-tail
//! probabilities keep their relative accuracy.

use fc_core::Real;
use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// The standard normal probability density `φ(x) = exp(−x²/2) / √(2π)`.
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution `Φ(x)`.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}
