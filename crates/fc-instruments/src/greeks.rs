//! Finite-difference Greeks driven through [`PricingContext`] overrides.
//!
//! Every bump is a scope layered over the caller's current view, so an
//! instrument only needs to read its inputs through
//! [`PricingContext::value_or`] for these to work.

use fc_core::{MarketInput, Overrides, PricingContext, Real, Result};

use crate::instrument::{MarketState, Priceable};

/// Relative spot bump for delta and gamma.
pub const SPOT_BUMP: Real = 1e-4;

/// Absolute bump for volatility and rates.
pub const PARAMETER_BUMP: Real = 1e-4;

/// Sensitivities from bump-and-reprice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Central first difference in spot.
    pub delta: Real,
    /// Central second difference in spot.
    pub gamma: Real,
    /// Forward difference in volatility, per unit.
    pub vega: Real,
    /// One-day roll, annualised.
    pub theta: Real,
    /// Forward difference in `interest_rate`, per unit.
    pub rho: Option<Real>,
    /// Forward difference in `dividend_yield`, per unit.
    pub rho_q: Option<Real>,
}

/// Bump-and-reprice Greeks for instruments whose inputs are
/// [`MarketInput`]s.
pub trait BumpGreeks: Priceable {
    /// The input delta and gamma are taken with respect to.
    fn spot_input(&self) -> MarketInput;

    /// The value of `input` the pricer would use right now: the innermost
    /// override if one is active, else the market's own value.
    ///
    /// # Errors
    /// `Unsupported` for inputs the instrument does not consume.
    fn effective_input(&self, market: &Self::Market, input: MarketInput) -> Result<Real>;

    /// Rate-like inputs pinned across the theta roll and bumped for rho.
    fn carry_inputs(&self) -> &'static [MarketInput] {
        &[MarketInput::InterestRate, MarketInput::DividendYield]
    }

    /// Price with `input` set to `value` in a scope over the current view.
    fn price_with(&self, market: &Self::Market, input: MarketInput, value: Real) -> Result<Real> {
        PricingContext::scoped(Overrides::new().with(input, value), || self.price(market))
    }

    /// `(P(S+h) − P(S−h)) / 2h` with `h = 1e-4·S`.
    fn delta(&self, market: &Self::Market) -> Result<Real> {
        let input = self.spot_input();
        let spot = self.effective_input(market, input)?;
        let h = SPOT_BUMP * spot;
        let up = self.price_with(market, input, spot + h)?;
        let down = self.price_with(market, input, spot - h)?;
        Ok((up - down) / (2.0 * h))
    }

    /// `(P(S+h) − 2P(S) + P(S−h)) / h²` with `h = 1e-4·S`.
    fn gamma(&self, market: &Self::Market) -> Result<Real> {
        let input = self.spot_input();
        let spot = self.effective_input(market, input)?;
        let h = SPOT_BUMP * spot;
        let up = self.price_with(market, input, spot + h)?;
        let mid = self.price(market)?;
        let down = self.price_with(market, input, spot - h)?;
        Ok((up - 2.0 * mid + down) / (h * h))
    }

    /// Forward difference in `input` with an absolute bump.
    fn forward_difference(&self, market: &Self::Market, input: MarketInput) -> Result<Real> {
        let base = self.price(market)?;
        let value = self.effective_input(market, input)?;
        let bumped = self.price_with(market, input, value + PARAMETER_BUMP)?;
        Ok((bumped - base) / PARAMETER_BUMP)
    }

    /// Sensitivity to volatility.
    fn vega(&self, market: &Self::Market) -> Result<Real> {
        self.forward_difference(market, MarketInput::Volatility)
    }

    /// Sensitivity to `interest_rate`.
    fn rho(&self, market: &Self::Market) -> Result<Real> {
        self.forward_difference(market, MarketInput::InterestRate)
    }

    /// Sensitivity to `dividend_yield`.
    fn rho_q(&self, market: &Self::Market) -> Result<Real> {
        self.forward_difference(market, MarketInput::DividendYield)
    }

    /// One calendar day of decay, annualised: `(P(t+1d) − P(t)) · 365`.
    ///
    /// The carry inputs are pinned at their effective values for both legs.
    fn theta(&self, market: &Self::Market) -> Result<Real>
    where
        Self::Market: MarketState,
    {
        let mut pins = Overrides::new();
        for &input in self.carry_inputs() {
            pins.set(input, self.effective_input(market, input)?);
        }
        let tomorrow = market.with_valuation_date(market.valuation_date().add_days(1)?)?;
        PricingContext::scoped(pins, || {
            let today = self.price(market)?;
            let rolled = self.price(&tomorrow)?;
            Ok((rolled - today) * 365.0)
        })
    }

    /// Every Greek, errors propagated unchanged.
    fn greeks(&self, market: &Self::Market) -> Result<Greeks>
    where
        Self::Market: MarketState,
    {
        let carries = self.carry_inputs();
        let rho = if carries.contains(&MarketInput::InterestRate) {
            Some(self.rho(market)?)
        } else {
            None
        };
        let rho_q = if carries.contains(&MarketInput::DividendYield) {
            Some(self.rho_q(market)?)
        } else {
            None
        };
        Ok(Greeks {
            delta: self.delta(market)?,
            gamma: self.gamma(market)?,
            vega: self.vega(market)?,
            theta: self.theta(market)?,
            rho,
            rho_q,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fc_core::unsupported;
    use fc_time::Date;

    /// `P = S² · σ + r − q`, with a linear clock.
    #[derive(Debug)]
    struct Quadratic;

    #[derive(Debug, Clone, Copy)]
    struct Flat {
        valuation: Date,
        spot: Real,
    }

    impl MarketState for Flat {
        fn valuation_date(&self) -> Date {
            self.valuation
        }

        fn with_valuation_date(&self, date: Date) -> Result<Self> {
            Ok(Self { valuation: date, ..*self })
        }
    }

    impl Priceable for Quadratic {
        type Market = Flat;

        fn price(&self, m: &Flat) -> Result<Real> {
            let s = PricingContext::value_or(MarketInput::StockPrice, m.spot);
            let sigma = PricingContext::value_or(MarketInput::Volatility, 0.5);
            let r = PricingContext::value_or(MarketInput::InterestRate, 0.0);
            let q = PricingContext::value_or(MarketInput::DividendYield, 0.0);
            let days = m.valuation.serial() as Real;
            Ok(s * s * sigma + r - q + days / 365.0)
        }
    }

    impl BumpGreeks for Quadratic {
        fn spot_input(&self) -> MarketInput {
            MarketInput::StockPrice
        }

        fn effective_input(&self, m: &Flat, input: MarketInput) -> Result<Real> {
            Ok(match input {
                MarketInput::StockPrice => PricingContext::value_or(input, m.spot),
                MarketInput::Volatility => PricingContext::value_or(input, 0.5),
                MarketInput::InterestRate | MarketInput::DividendYield => {
                    PricingContext::value_or(input, 0.0)
                }
                other => unsupported!("{other} is not an input"),
            })
        }
    }

    fn market() -> Flat {
        Flat {
            valuation: Date::from_ymd(2020, 1, 1).unwrap(),
            spot: 10.0,
        }
    }

    #[test]
    fn differences_match_derivatives() {
        let g = Quadratic.greeks(&market()).unwrap();
        assert_abs_diff_eq!(g.delta, 10.0, epsilon = 1e-8);
        assert_abs_diff_eq!(g.gamma, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(g.vega, 100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(g.theta, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(g.rho.unwrap(), 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(g.rho_q.unwrap(), -1.0, epsilon = 1e-8);
    }

    #[test]
    fn bumps_layer_over_outer_scope() {
        let outer = Overrides::new().with(MarketInput::StockPrice, 20.0);
        let delta = PricingContext::scoped(outer, || Quadratic.delta(&market())).unwrap();
        assert_abs_diff_eq!(delta, 20.0, epsilon = 1e-8);
        assert_eq!(PricingContext::depth(), 0);
    }

    #[test]
    fn errors_are_not_rewrapped() {
        let err = Quadratic
            .effective_input(&market(), MarketInput::FxSpot)
            .unwrap_err();
        assert!(matches!(err, fc_core::Error::Unsupported(_)));
    }
}
