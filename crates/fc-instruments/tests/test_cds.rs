//! CDS pricing and credit-curve calibration on a bootstrapped IBOR curve.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use fc_core::Error;
use fc_instruments::{Cds, IborSingleCurve, Priceable};
use fc_termstructures::{
    BootstrapConfig, CreditBootstrapConfig, CreditCalibrationInstrument, CreditCurve,
    DiscountCurve,
};
use fc_time::Date;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn valuation() -> Date {
    date(2019, 8, 12)
}

/// USD deposit and swap quotes on 2019-08-12.
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

fn discount() -> Arc<dyn DiscountCurve> {
    let built = IborSingleCurve::from_quotes(
        valuation(),
        "USD",
        &DEPOSITS,
        &SWAPS,
        &BootstrapConfig::default(),
    )
    .unwrap();
    Arc::clone(built.curve()) as Arc<dyn DiscountCurve>
}

fn quotes() -> Vec<Cds> {
    [("1Y", 50.0), ("2Y", 55.0), ("3Y", 60.0), ("5Y", 65.0), ("7Y", 69.0), ("10Y", 73.0)]
        .into_iter()
        .map(|(tenor, bp)| Cds::from_tenor(valuation(), tenor, bp * 1e-4, 1e7, 0.4, true).unwrap())
        .collect()
}

fn calibrate(cds: &[Cds], config: &CreditBootstrapConfig) -> Result<CreditCurve, Error> {
    let insts: Vec<&dyn CreditCalibrationInstrument> =
        cds.iter().map(|c| c as &dyn CreditCalibrationInstrument).collect();
    CreditCurve::calibrate(valuation(), &insts, discount(), 0.4, config)
}

#[test]
fn par_spreads_are_reproduced() {
    let cds = quotes();
    let curve = calibrate(&cds, &CreditBootstrapConfig::default()).unwrap();
    for c in &cds {
        assert_abs_diff_eq!(c.par_spread(&curve).unwrap(), c.coupon(), epsilon = 1e-10);
        assert_abs_diff_eq!(c.price(&curve).unwrap(), 0.0, epsilon = 1e-4);
    }
}

#[test]
fn survival_is_strictly_decreasing() {
    let curve = calibrate(&quotes(), &CreditBootstrapConfig::default()).unwrap();
    assert!(curve.survival().windows(2).all(|w| w[1] < w[0]));
    assert!(curve.hazards().iter().all(|&h| h > 0.0));

    let dates: Vec<Date> = (1..=40).map(|q| valuation().add_months(3 * q).unwrap()).collect();
    let probs = curve.survival_probs(&dates);
    assert!(probs.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn results_split_the_legs() {
    let cds = quotes();
    let curve = calibrate(&cds, &CreditBootstrapConfig::default()).unwrap();
    let wide = Cds::from_tenor(valuation(), "5Y", 0.0100, 1e7, 0.4, true).unwrap();
    let r = wide.results(&curve).unwrap();
    assert_abs_diff_eq!(
        r.npv,
        r.get("protection_leg").unwrap() - r.get("premium_leg").unwrap(),
        epsilon = 1e-6
    );
    // Buying protection above the market spread loses money.
    assert!(r.npv < 0.0);
    assert_abs_diff_eq!(r.get("par_spread").unwrap(), 0.0065, epsilon = 1e-10);
}

#[test]
fn strict_mode_rejects_inverted_spreads() {
    let cds: Vec<Cds> = [("1Y", 200.0), ("2Y", 20.0)]
        .into_iter()
        .map(|(tenor, bp)| Cds::from_tenor(valuation(), tenor, bp * 1e-4, 1e7, 0.4, true).unwrap())
        .collect();
    let strict = CreditBootstrapConfig::default().with_strict(true);
    match calibrate(&cds, &strict) {
        Err(Error::CalibrationFailure { instrument, .. }) => {
            assert_eq!(instrument, cds[1].describe())
        }
        other => panic!("expected a calibration failure, got {other:?}"),
    }
}
