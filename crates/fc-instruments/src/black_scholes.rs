//! Black–Scholes–Merton closed form.
//!
//! $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
//! With `q` read as the foreign rate this is Garman–Kohlhagen.

use fc_core::{ensure, Rate, Real, Result, Time, Volatility};
use fc_math::solvers1d::brent;
use fc_math::{normal_cdf, normal_pdf};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// `+1` for a call, `−1` for a put.
    pub fn sign(&self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        })
    }
}

/// Closed-form price and sensitivities.
///
/// Vega and rho are per unit absolute shift; theta is per year of calendar
/// time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesResult {
    /// Premium.
    pub price: Real,
    /// ∂P/∂S.
    pub delta: Real,
    /// ∂²P/∂S².
    pub gamma: Real,
    /// ∂P/∂σ.
    pub vega: Real,
    /// ∂P/∂t.
    pub theta: Real,
    /// ∂P/∂r.
    pub rho: Real,
    /// ∂P/∂q.
    pub rho_q: Real,
}

/// Price a European option under Black–Scholes–Merton.
///
/// An expired option (`t ≤ 0`) is worth its intrinsic value. A zero
/// volatility gives the discounted forward intrinsic value.
///
/// # Errors
/// `BadInput` for a non-positive spot or strike, a negative volatility or
/// non-finite inputs.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    t: Time,
) -> Result<BlackScholesResult> {
    ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
    ensure!(strike.is_finite() && strike > 0.0, "strike must be positive, got {strike}");
    ensure!(
        volatility.is_finite() && volatility >= 0.0,
        "volatility must be non-negative, got {volatility}"
    );
    ensure!(
        rate.is_finite() && dividend_yield.is_finite() && t.is_finite(),
        "rates and time must be finite"
    );
    let phi = option_type.sign();

    if t <= 0.0 {
        let intrinsic = (phi * (spot - strike)).max(0.0);
        let delta = if intrinsic > 0.0 { phi } else { 0.0 };
        return Ok(BlackScholesResult {
            price: intrinsic,
            delta,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
            rho_q: 0.0,
        });
    }

    let (r, q, sigma) = (rate, dividend_yield, volatility);
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();
    let forward = spot * ((r - q) * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if forward > strike { 1e15 } else { -1e15 };
        (big, big)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let price = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    let delta = phi * df_q * nd1;
    let (gamma, vega, decay) = if std_dev > 1e-15 {
        (
            df_q * npd1 / (spot * std_dev),
            spot * df_q * npd1 * sqrt_t,
            -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t),
        )
    } else {
        (0.0, 0.0, 0.0)
    };
    let theta = decay - phi * r * strike * df_r * nd2 + phi * q * spot * df_q * nd1;
    let rho = phi * strike * t * df_r * nd2;
    let rho_q = -phi * spot * t * df_q * nd1;

    Ok(BlackScholesResult {
        price: price.max(0.0),
        delta,
        gamma,
        vega,
        theta,
        rho,
        rho_q,
    })
}

/// Volatility at which the closed form reproduces `price`.
///
/// # Errors
/// `BadInput` when `price` lies outside the no-arbitrage bounds or the
/// inputs are invalid; `CalibrationFailure` if the root search fails.
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility(
    option_type: OptionType,
    price: Real,
    spot: Real,
    strike: Real,
    rate: Rate,
    dividend_yield: Rate,
    t: Time,
    accuracy: Real,
) -> Result<Volatility> {
    ensure!(t > 0.0, "implied volatility needs time to expiry, got {t}");
    let floor = black_scholes_merton(option_type, spot, strike, rate, dividend_yield, 0.0, t)?.price;
    let cap = match option_type {
        OptionType::Call => spot * (-dividend_yield * t).exp(),
        OptionType::Put => strike * (-rate * t).exp(),
    };
    ensure!(
        price > floor && price < cap,
        "price {price} outside the arbitrage bounds ({floor}, {cap})"
    );
    brent(
        |sigma| {
            Ok(black_scholes_merton(option_type, spot, strike, rate, dividend_yield, sigma, t)?.price
                - price)
        },
        1e-6,
        5.0,
        accuracy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn at_the_money_call() {
        let r = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0).unwrap();
        assert_abs_diff_eq!(r.price, 10.450_583_572_185_565, epsilon = 1e-7);
        assert!(r.delta > 0.5 && r.delta < 0.8);
        assert!(r.gamma > 0.0 && r.vega > 0.0 && r.rho > 0.0);
    }

    #[test]
    fn put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 105.0, 0.08, 0.03, 0.25, 0.5);
        let call = black_scholes_merton(OptionType::Call, s, k, r, q, sigma, t).unwrap();
        let put = black_scholes_merton(OptionType::Put, s, k, r, q, sigma, t).unwrap();
        let parity = call.price - s * (-q * t).exp() + k * (-r * t).exp();
        assert_abs_diff_eq!(put.price, parity, epsilon = 1e-10);
        assert_abs_diff_eq!(call.delta - put.delta, (-q * t).exp(), epsilon = 1e-12);
    }

    #[test]
    fn zero_vol_is_discounted_intrinsic() {
        let r = black_scholes_merton(OptionType::Call, 100.0, 95.0, 0.05, 0.0, 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(r.price, 100.0 - 95.0 * (-0.05_f64).exp(), epsilon = 1e-12);
        assert_eq!(r.gamma, 0.0);
    }

    #[test]
    fn expired_option_is_intrinsic() {
        let r = black_scholes_merton(OptionType::Put, 90.0, 100.0, 0.05, 0.0, 0.2, 0.0).unwrap();
        assert_eq!(r.price, 10.0);
        assert_eq!(r.delta, -1.0);
    }

    #[test]
    fn rejects_negative_vol_and_strike() {
        let neg_vol = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.0, 0.0, -0.1, 1.0);
        assert!(neg_vol.unwrap_err().is_bad_input());
        let bad_strike = black_scholes_merton(OptionType::Call, 100.0, 0.0, 0.0, 0.0, 0.1, 1.0);
        assert!(bad_strike.unwrap_err().is_bad_input());
    }

    #[test]
    fn implied_vol_recovers_input() {
        let p = black_scholes_merton(OptionType::Put, 100.0, 110.0, 0.02, 0.01, 0.35, 0.75)
            .unwrap()
            .price;
        let vol = implied_volatility(OptionType::Put, p, 100.0, 110.0, 0.02, 0.01, 0.75, 1e-12).unwrap();
        assert_abs_diff_eq!(vol, 0.35, epsilon = 1e-8);
    }
}
