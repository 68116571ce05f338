//! # fc-math
//!
//! Numerical building blocks for fincurve: one-dimensional interpolation,
//! the discount-factor [`Interpolator`] used by the curve variants, root
//! finders for the bootstrap, the standard normal distribution and linear
//! least squares.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal density and cumulative distribution.
pub mod distributions;

/// One-dimensional interpolation schemes and the discount-factor interpolator.
pub mod interpolations;

/// Linear least-squares regression on a design matrix.
pub mod least_squares;

/// One-dimensional root finders.
pub mod solvers1d;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use interpolations::{
    cubic::{CubicNaturalSpline, FritschButlandCubic},
    interpolator::{InterpKind, Interpolator},
    Interpolation1D, LinearInterpolation,
};
pub use least_squares::LinearLeastSquares;
