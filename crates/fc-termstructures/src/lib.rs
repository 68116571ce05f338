//! # fc-termstructures
//!
//! Discount curves, the sequential bootstrap that calibrates them to market
//! instruments, and survival-probability curves calibrated from CDS.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure`: valuation date and day count shared by all curves.
pub mod term_structure;

/// `DiscountCurve`: the discount-factor query surface and `BumpCurve`.
pub mod discount_curve;

/// `FlatCurve`: a single rate under explicit conventions.
pub mod flat_curve;

/// `InterpolatedDiscountCurve`: pillar dates and discount factors.
pub mod interpolated_discount_curve;

/// `ZerosCurve`: pillar dates and zero rates.
pub mod zeros_curve;

/// Nelson–Siegel and Nelson–Siegel–Svensson parametric curves.
pub mod nelson_siegel;

/// `PolynomialCurve`: zero rate polynomial in time.
pub mod polynomial_curve;

/// Piecewise flat-forward and piecewise linear-zero curves.
pub mod piecewise;

/// `ZeroSpreadedCurve`: a base curve shifted by a continuous zero spread.
pub mod zero_spreaded_curve;

/// Sequential discount-curve bootstrap.
pub mod bootstrap;

/// `CreditCurve`: survival probabilities under piecewise-constant hazard.
pub mod credit_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bootstrap::{bootstrap_discount_curve, BootstrapConfig, CalibrationInstrument};
pub use credit_curve::{CreditBootstrapConfig, CreditCalibrationInstrument, CreditCurve};
pub use discount_curve::{BumpCurve, DiscountCurve, FORWARD_STEP};
pub use flat_curve::FlatCurve;
pub use interpolated_discount_curve::InterpolatedDiscountCurve;
pub use nelson_siegel::{NelsonSiegelCurve, NelsonSiegelSvenssonCurve};
pub use piecewise::{PiecewiseFlatForwardCurve, PiecewiseLinearZeroCurve};
pub use polynomial_curve::PolynomialCurve;
pub use term_structure::TermStructure;
pub use zero_spreaded_curve::ZeroSpreadedCurve;
pub use zeros_curve::ZerosCurve;
