//! # fincurve
//!
//! Discount and credit curve construction, sequential bootstrapping, and
//! scenario pricing with scoped market-input overrides.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the individual
//! `fc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use fincurve::core::{MarketInput, Overrides, PricingContext};
//! use fincurve::instruments::{EquityMarket, EquityVanillaOption, OptionType, Priceable};
//! use fincurve::time::Date;
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let market = EquityMarket::new(today, 100.0, 0.03, 0.0, 0.2).unwrap();
//! let call = EquityVanillaOption::new(OptionType::Call, 100.0, today.add_tenor("1Y").unwrap()).unwrap();
//!
//! let base = call.price(&market).unwrap();
//! let stressed = PricingContext::scoped(
//!     Overrides::new().with(MarketInput::Volatility, 0.3),
//!     || call.price(&market).unwrap(),
//! );
//! assert!(stressed > base);
//! assert_eq!(call.price(&market).unwrap(), base);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core aliases, errors and the pricing context.
pub use fc_core as core;

/// Dates, calendars, day counts and schedules.
pub use fc_time as time;

/// Interpolation, root finding and distributions.
pub use fc_math as math;

/// Discount curves, the bootstrap and credit curves.
pub use fc_termstructures as termstructures;

/// Instruments, pricers and bump Greeks.
pub use fc_instruments as instruments;
