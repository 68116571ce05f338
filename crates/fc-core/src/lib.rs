//! # fc-core
//!
//! Core types, error definitions, and the pricing context for fincurve.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: type aliases, the error kinds, the
//! numerical-warning hook, and the per-thread [`PricingContext`] through
//! which market inputs are overridden for bump-and-revalue.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding conventions.
pub mod compounding;

/// Error types and the `ensure!` / `fail!` / `unsupported!` /
/// `numerical_warning!` macros.
pub mod errors;

/// Scoped per-thread overrides of named market inputs.
pub mod pricing_context;

#[doc(hidden)]
pub use tracing as __tracing;

// ── Scalar aliases ────────────────────────────────────────────────────────────
//
// Plain `f64` aliases. They document intent in signatures and carry no
// validation of their own.

/// The library's floating-point scalar.
pub type Real = f64;

/// Year fraction measured from a curve's valuation date.
pub type Time = Real;

/// Decimal interest rate or yield, `0.05` for 5%.
pub type Rate = Real;

/// Decimal spread, such as a CDS running coupon.
pub type Spread = Real;

/// Discount factor `D(t)`; `D(0) = 1`.
pub type DiscountFactor = Real;

/// Survival probability `Q(t)` in `(0, 1]`.
pub type Probability = Real;

/// Decimal annualised volatility.
pub type Volatility = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
pub use pricing_context::{ContextGuard, MarketInput, Overrides, PricingContext};
