//! # fc-instruments
//!
//! Instrument records, their pricers, and bump-and-revalue Greeks.
//!
//! Pricers read scalar market inputs through the per-thread
//! [`PricingContext`](fc_core::PricingContext), so any price can be taken
//! under temporary overrides without touching the market objects. The rate
//! instruments double as bootstrap inputs for `fc-termstructures`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Instrument`, `Priceable`, `MarketState` and `PricingResults`.
pub mod instrument;

/// Market snapshots: rates, equity and FX.
pub mod market;

/// Finite-difference Greeks through context overrides.
pub mod greeks;

/// Black–Scholes–Merton closed form and implied volatility.
pub mod black_scholes;

/// Money-market deposit.
pub mod deposit;

/// Forward rate agreement.
pub mod fra;

/// Vanilla IBOR swap and market conventions.
pub mod swap;

/// Zero-coupon bond.
pub mod zero_coupon_bond;

/// Credit default swap.
pub mod cds;

/// European equity option.
pub mod equity_option;

/// European FX option.
pub mod fx_option;

/// IBOR single-curve construction.
pub mod ibor_single_curve;

/// Parallel batch pricing.
pub mod parallel;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_scholes::{black_scholes_merton, implied_volatility, BlackScholesResult, OptionType};
pub use cds::Cds;
pub use deposit::Deposit;
pub use equity_option::EquityVanillaOption;
pub use fra::Fra;
pub use fx_option::FxVanillaOption;
pub use greeks::{BumpGreeks, Greeks};
pub use ibor_single_curve::IborSingleCurve;
pub use instrument::{Instrument, MarketState, Priceable, PricingResults};
pub use market::{EquityMarket, FxMarket, RatesMarket};
pub use parallel::{par_greeks, par_price};
pub use swap::{IborSwap, SwapConvention};
pub use zero_coupon_bond::ZeroCouponBond;
