//! European option pricing and bump Greeks.

use approx::assert_abs_diff_eq;
use fc_instruments::{BumpGreeks, EquityMarket, EquityVanillaOption, OptionType, Priceable};
use fc_math::{normal_cdf, normal_pdf};
use fc_time::Date;
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Textbook formula, written out independently of the library.
fn reference_call(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sd = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / sd;
    let d2 = d1 - sd;
    let price = s * (-q * t).exp() * normal_cdf(d1) - k * (-r * t).exp() * normal_cdf(d2);
    (price, (-q * t).exp() * normal_cdf(d1))
}

#[test]
fn vanilla_call_matches_closed_form() {
    let valuation = date(2015, 5, 8);
    let expiry = date(2016, 1, 15);
    let market = EquityMarket::new(valuation, 127.62, 0.001, 0.0163, 0.20).unwrap();
    let call = EquityVanillaOption::new(OptionType::Call, 130.0, expiry).unwrap();

    let t = 252.0 / 365.0;
    assert_abs_diff_eq!(call.time_to_expiry(&market), t, epsilon = 1e-15);
    let (expected, analytic_delta) = reference_call(127.62, 130.0, 0.001, 0.0163, 0.20, t);
    assert_abs_diff_eq!(call.price(&market).unwrap(), expected, epsilon = 1e-10);

    let delta = call.delta(&market).unwrap();
    assert_abs_diff_eq!(delta, analytic_delta, epsilon = 1e-4);
    assert_abs_diff_eq!(delta, call.analytic(&market).unwrap().delta, epsilon = 1e-4);
}

#[test]
fn put_greeks_have_the_right_signs() {
    let market = EquityMarket::new(date(2015, 5, 8), 127.62, 0.001, 0.0163, 0.20).unwrap();
    let put = EquityVanillaOption::new(OptionType::Put, 130.0, date(2016, 1, 15)).unwrap();
    let g = put.greeks(&market).unwrap();
    assert!(g.delta < 0.0 && g.delta > -1.0);
    assert!(g.gamma > 0.0);
    assert!(g.vega > 0.0);
    assert!(g.rho.unwrap() < 0.0);
    assert!(g.rho_q.unwrap() > 0.0);

    let r = put.results(&market).unwrap();
    let t = 252.0_f64 / 365.0;
    let d1 = ((127.62_f64 / 130.0).ln() + (0.001 - 0.0163 + 0.02) * t) / (0.2 * t.sqrt());
    let vega = 127.62 * (-0.0163 * t).exp() * normal_pdf(d1) * t.sqrt();
    assert_abs_diff_eq!(r.get("vega").unwrap(), vega, epsilon = 1e-9);
}

#[test]
fn negative_volatility_is_rejected() {
    assert!(EquityMarket::new(date(2015, 5, 8), 127.62, 0.001, 0.0163, -0.2)
        .unwrap_err()
        .is_bad_input());
}

proptest! {
    #[test]
    fn central_delta_tracks_analytic_delta(
        spot in 50.0..150.0f64,
        strike in 50.0..150.0f64,
        sigma in 0.05..0.6f64,
        days in 30..1000i32,
        put in any::<bool>(),
    ) {
        let valuation = date(2020, 1, 2);
        let market = EquityMarket::new(valuation, spot, 0.02, 0.01, sigma).unwrap();
        let kind = if put { OptionType::Put } else { OptionType::Call };
        let option = EquityVanillaOption::new(kind, strike, valuation.add_days(days).unwrap()).unwrap();
        let bumped = option.delta(&market).unwrap();
        let analytic = option.analytic(&market).unwrap().delta;
        prop_assert!((bumped - analytic).abs() <= 1e-4, "bumped {} analytic {}", bumped, analytic);
    }
}
