//! IBOR single-curve bootstrap against USD-style quotes.

use approx::assert_abs_diff_eq;
use fc_core::{MarketInput, Overrides, PricingContext};
use fc_instruments::{IborSingleCurve, IborSwap, Priceable, SwapConvention};
use fc_math::InterpKind;
use fc_termstructures::{BootstrapConfig, CalibrationInstrument, DiscountCurve, FlatCurve};
use fc_time::Date;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fincurve=debug,fc_termstructures=debug,fc_instruments=debug")
        .with_test_writer()
        .try_init();
}

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const DEPOSITS: [(&str, f64); 6] = [
    ("1D", 0.0220),
    ("1M", 0.0220),
    ("2M", 0.0216),
    ("3M", 0.0213),
    ("6M", 0.0204),
    ("12M", 0.0198),
];

const SWAPS: [(&str, f64); 10] = [
    ("2Y", 0.01523),
    ("3Y", 0.01460),
    ("4Y", 0.01448),
    ("5Y", 0.01458),
    ("6Y", 0.01476),
    ("7Y", 0.01498),
    ("8Y", 0.01522),
    ("9Y", 0.01547),
    ("10Y", 0.01572),
    ("12Y", 0.01617),
];

fn build(kind: InterpKind) -> IborSingleCurve {
    let config = BootstrapConfig::default().with_interpolation(kind);
    IborSingleCurve::from_quotes(date(2019, 8, 12), "USD", &DEPOSITS, &SWAPS, &config)
        .unwrap_or_else(|e| panic!("{kind}: {e}"))
}

#[test]
fn every_instrument_reprices() {
    init_tracing();
    let built = build(InterpKind::FlatFwdRates);
    let curve = built.curve();
    assert_eq!(curve.dates().len(), DEPOSITS.len() + SWAPS.len() + 1);
    assert_eq!(curve.df(date(2019, 8, 12)), 1.0);

    for dep in built.deposits() {
        let pv = dep.pv(curve.as_ref()).unwrap();
        assert!(pv.abs() <= 1e-8 * dep.notional(), "{} misprices by {pv}", dep.describe());
    }
    for swap in built.swaps() {
        let pv = CalibrationInstrument::pv(swap, curve.as_ref()).unwrap();
        assert!(pv.abs() <= 1e-8 * swap.notional(), "{} misprices by {pv}", swap.describe());
        assert_abs_diff_eq!(swap.par_rate(curve.as_ref()).unwrap(), swap.fixed_rate(), epsilon = 1e-8);
    }
}

#[test]
fn every_interpolation_reprices() {
    for kind in InterpKind::ALL {
        let built = build(kind);
        for (name, err) in built.repricing_errors().unwrap() {
            assert!(err.abs() <= 1e-8, "{kind}: {name} misprices by {err}");
        }
    }
}

#[test]
fn curve_is_positive_and_decreasing() {
    let built = build(InterpKind::FlatFwdRates);
    let dfs = built.curve().dfs();
    assert!(dfs.iter().all(|&df| df > 0.0));
    assert!(dfs.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn swap_prices_off_the_market_and_under_overrides() {
    let built = build(InterpKind::FlatFwdRates);
    let market = built.market();
    let v = date(2019, 8, 12);
    let swap = IborSwap::from_tenor(v, "7Y", 0.02, SwapConvention::USD, 1e7, true).unwrap();
    // Paying 2% when par is about 1.5% loses money.
    assert!(swap.price(&market).unwrap() < 0.0);

    let flat = FlatCurve::continuous(v, 0.03).unwrap();
    let expected = swap.npv(&flat).unwrap();
    let overridden = PricingContext::scoped(
        Overrides::new().with(MarketInput::InterestRate, 0.03),
        || swap.price(&market),
    )
    .unwrap();
    assert_abs_diff_eq!(overridden, expected, epsilon = 1e-9);

    let results = swap.results(&market).unwrap();
    assert_abs_diff_eq!(
        results.npv,
        results.get("float_leg").unwrap() - results.get("fixed_leg").unwrap(),
        epsilon = 1e-9
    );
}
