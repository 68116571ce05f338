//! Scoped overrides of market inputs.
//!
//! A [`PricingContext`] scope overlays named market parameters on top of
//! whatever the caller passed explicitly. Instruments consult
//! [`PricingContext::lookup`] at pricing time; when an override exists for an
//! input they consume, they use it (building a transient flat curve for rate
//! inputs) instead of the explicit market data.
//!
//! The stack of overlays is per thread. Entering a scope pushes one overlay;
//! dropping the returned [`ContextGuard`] removes exactly that overlay, also
//! while unwinding. Nested scopes shadow outer ones name by name.
//!
//! Guards are meant to be released innermost first. A guard released out of
//! order removes only its own overlay and logs a warning on the
//! `fincurve::context` target; scopes opened after it stay active.
//!
//! ```
//! use fc_core::pricing_context::{MarketInput, Overrides, PricingContext};
//!
//! assert_eq!(PricingContext::lookup(MarketInput::InterestRate), None);
//! {
//!     let _outer = PricingContext::enter(
//!         Overrides::new()
//!             .with(MarketInput::InterestRate, 0.04)
//!             .with(MarketInput::Volatility, 0.25),
//!     );
//!     let _inner = PricingContext::enter(Overrides::new().with(MarketInput::InterestRate, 0.06));
//!     assert_eq!(PricingContext::lookup(MarketInput::InterestRate), Some(0.06));
//!     assert_eq!(PricingContext::lookup(MarketInput::Volatility), Some(0.25));
//! }
//! assert_eq!(PricingContext::depth(), 0);
//! ```

use crate::errors::{Error, Result};
use crate::Real;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::str::FromStr;

/// A market input that may be overridden inside a pricing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MarketInput {
    /// Continuously-compounded risk-free (domestic) rate.
    InterestRate,
    /// Continuous dividend yield.
    DividendYield,
    /// Black–Scholes volatility.
    Volatility,
    /// Spot price of an equity underlying.
    StockPrice,
    /// Spot FX rate (domestic per foreign).
    FxSpot,
    /// Recovery rate of a credit reference entity.
    RecoveryRate,
}

impl MarketInput {
    /// Every recognised input, in slot order.
    pub const ALL: [MarketInput; 6] = [
        MarketInput::InterestRate,
        MarketInput::DividendYield,
        MarketInput::Volatility,
        MarketInput::StockPrice,
        MarketInput::FxSpot,
        MarketInput::RecoveryRate,
    ];

    /// The override name, e.g. `"interest_rate"`.
    pub fn name(&self) -> &'static str {
        match self {
            MarketInput::InterestRate => "interest_rate",
            MarketInput::DividendYield => "dividend_yield",
            MarketInput::Volatility => "volatility",
            MarketInput::StockPrice => "stock_price",
            MarketInput::FxSpot => "fx_spot",
            MarketInput::RecoveryRate => "recovery_rate",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl FromStr for MarketInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MarketInput::ALL
            .into_iter()
            .find(|input| input.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::BadInput(format!("unknown market input '{s}'")))
    }
}

impl std::fmt::Display for MarketInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of market-input overrides, at most one value per input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overrides {
    values: [Option<Real>; 6],
}

impl Overrides {
    /// An empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, input: MarketInput, value: Real) -> Self {
        self.set(input, value);
        self
    }

    /// Set the override for `input`, replacing any previous value.
    pub fn set(&mut self, input: MarketInput, value: Real) {
        self.values[input.slot()] = Some(value);
    }

    /// Remove the override for `input`.
    pub fn clear(&mut self, input: MarketInput) {
        self.values[input.slot()] = None;
    }

    /// The override for `input`, if any.
    pub fn get(&self, input: MarketInput) -> Option<Real> {
        self.values[input.slot()]
    }

    /// `true` if no input is overridden.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Iterate over the overridden inputs.
    pub fn iter(&self) -> impl Iterator<Item = (MarketInput, Real)> + '_ {
        MarketInput::ALL
            .into_iter()
            .filter_map(move |input| self.get(input).map(|v| (input, v)))
    }

    /// Build from `(name, value)` pairs such as `("interest_rate", 0.04)`.
    ///
    /// # Errors
    /// `BadInput` for an unknown name or a non-finite value.
    pub fn try_from_pairs(pairs: &[(&str, Real)]) -> Result<Self> {
        let mut out = Self::new();
        for &(name, value) in pairs {
            let input: MarketInput = name.parse()?;
            crate::ensure!(value.is_finite(), "override {name} = {value} is not finite");
            out.set(input, value);
        }
        Ok(out)
    }

    /// Return `self` layered over `base`: names set here win, the rest come
    /// from `base`.
    pub fn layered_over(&self, base: &Overrides) -> Overrides {
        let mut out = *base;
        for (input, value) in self.iter() {
            out.set(input, value);
        }
        out
    }
}

/// One overlay on the stack, tagged with the guard that owns it.
struct Scope {
    id: u64,
    overrides: Overrides,
}

thread_local! {
    static STACK: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Entry point to the per-thread stack of market overrides.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext;

impl PricingContext {
    /// Push `overrides` and return the guard that pops them.
    #[must_use = "the scope ends as soon as the guard is dropped"]
    pub fn enter(overrides: Overrides) -> ContextGuard {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        let depth = STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(Scope { id, overrides });
            stack.len()
        });
        ContextGuard {
            id,
            depth,
            _not_send: PhantomData,
        }
    }

    /// Run `f` inside a scope with `overrides`.
    pub fn scoped<R>(overrides: Overrides, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(overrides);
        f()
    }

    /// The active override for `input`, searching from the innermost scope.
    pub fn lookup(input: MarketInput) -> Option<Real> {
        STACK.with(|stack| stack.borrow().iter().rev().find_map(|s| s.overrides.get(input)))
    }

    /// The active override for `input`, or `fallback` outside any scope
    /// that sets it.
    pub fn value_or(input: MarketInput, fallback: Real) -> Real {
        Self::lookup(input).unwrap_or(fallback)
    }

    /// The active view flattened into one overlay.
    pub fn snapshot() -> Overrides {
        STACK.with(|stack| {
            stack
                .borrow()
                .iter()
                .fold(Overrides::new(), |acc, s| s.overrides.layered_over(&acc))
        })
    }

    /// Number of open scopes on this thread.
    pub fn depth() -> usize {
        STACK.with(|stack| stack.borrow().len())
    }
}

/// Keeps one overlay on the stack for its lifetime.
///
/// Not `Send`: a scope belongs to the thread that opened it.
#[derive(Debug)]
pub struct ContextGuard {
    id: u64,
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl ContextGuard {
    /// Stack height including this guard's overlay, as of entering the
    /// scope.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        // `try_with` keeps thread teardown from panicking.
        let _ = STACK.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            match stack.iter().rposition(|s| s.id == self.id) {
                Some(i) if i + 1 == stack.len() => {
                    stack.pop();
                }
                Some(i) => {
                    tracing::warn!(
                        target: "fincurve::context",
                        depth = i + 1,
                        open = stack.len(),
                        "pricing context scope released out of order"
                    );
                    stack.remove(i);
                }
                None => {}
            }
        });
    }
}
