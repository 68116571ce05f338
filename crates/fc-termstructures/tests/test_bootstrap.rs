//! Integration tests for the sequential bootstrap.

use fc_core::{Error, Real, Result};
use fc_math::InterpKind;
use fc_termstructures::{
    bootstrap_discount_curve, BootstrapConfig, CalibrationInstrument, DiscountCurve,
};
use fc_time::{Date, DayCountType};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fincurve=debug,fc_termstructures=debug")
        .with_test_writer()
        .try_init();
}

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Simple-rate deposit from `start` to `end`, ACT/360.
#[derive(Debug)]
struct TestDeposit {
    start: Date,
    end: Date,
    rate: Real,
}

impl TestDeposit {
    fn accrual(&self) -> Real {
        DayCountType::Act360.year_fraction(self.start, self.end)
    }
}

impl CalibrationInstrument for TestDeposit {
    fn maturity_date(&self) -> Date {
        self.end
    }

    fn market_quote(&self) -> Real {
        self.rate
    }

    fn notional(&self) -> Real {
        1_000_000.0
    }

    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        let growth = 1.0 + self.rate * self.accrual();
        Ok(self.notional() * (growth * curve.df(self.end) - curve.df(self.start)))
    }

    fn describe(&self) -> String {
        format!("deposit {:?}..{:?} @ {}", self.start, self.end, self.rate)
    }

    fn implied_pillar_df(&self, curve: &dyn DiscountCurve, last_pillar: Date) -> Option<Real> {
        (self.start <= last_pillar)
            .then(|| curve.df(self.start) / (1.0 + self.rate * self.accrual()))
    }
}

/// Annual par swap, receive fixed, ACT/365F, unadjusted dates.
#[derive(Debug)]
struct TestSwap {
    start: Date,
    years: i32,
    rate: Real,
}

impl CalibrationInstrument for TestSwap {
    fn maturity_date(&self) -> Date {
        self.start.add_months(12 * self.years).unwrap()
    }

    fn market_quote(&self) -> Real {
        self.rate
    }

    fn notional(&self) -> Real {
        10_000_000.0
    }

    fn pv(&self, curve: &dyn DiscountCurve) -> Result<Real> {
        let mut annuity = 0.0;
        let mut previous = self.start;
        for k in 1..=self.years {
            let pay = self.start.add_months(12 * k)?;
            annuity += DayCountType::Act365F.year_fraction(previous, pay) * curve.df(pay);
            previous = pay;
        }
        let float = curve.df(self.start) - curve.df(self.maturity_date());
        Ok(self.notional() * (self.rate * annuity - float))
    }

    fn describe(&self) -> String {
        format!("{}Y swap @ {}", self.years, self.rate)
    }
}

fn strip(valuation: Date) -> (Vec<TestDeposit>, Vec<TestSwap>) {
    let deposits = [(1, 0.0215), (3, 0.0212), (6, 0.0205), (12, 0.0198)]
        .into_iter()
        .map(|(m, rate)| TestDeposit {
            start: valuation,
            end: valuation.add_months(m).unwrap(),
            rate,
        })
        .collect();
    let swaps = [(2, 0.0170), (3, 0.0160), (5, 0.0155), (7, 0.0158), (10, 0.0165), (15, 0.0172)]
        .into_iter()
        .map(|(years, rate)| TestSwap {
            start: valuation,
            years,
            rate,
        })
        .collect();
    (deposits, swaps)
}

fn instruments<'a>(
    deposits: &'a [TestDeposit],
    swaps: &'a [TestSwap],
) -> Vec<&'a dyn CalibrationInstrument> {
    let mut all: Vec<&dyn CalibrationInstrument> = Vec::new();
    all.extend(deposits.iter().map(|d| d as &dyn CalibrationInstrument));
    all.extend(swaps.iter().map(|s| s as &dyn CalibrationInstrument));
    all
}

#[test]
fn every_interpolation_reprices_the_strip() {
    init_tracing();
    let valuation = date(2019, 8, 12);
    let (deposits, swaps) = strip(valuation);
    let insts = instruments(&deposits, &swaps);
    for kind in InterpKind::ALL {
        let config = BootstrapConfig::default().with_interpolation(kind);
        let curve = bootstrap_discount_curve(valuation, &insts, &config)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert_eq!(curve.dates().len(), insts.len() + 1);
        assert_eq!(curve.df(valuation), 1.0);
        for inst in &insts {
            assert!(curve.dates()[1..].contains(&inst.maturity_date()));
            let pv = inst.pv(&curve).unwrap();
            assert!(
                pv.abs() <= 1e-8 * inst.notional(),
                "{kind}: {} misprices by {pv}",
                inst.describe()
            );
        }
    }
}

#[test]
fn deposits_use_closed_form_pillars() {
    let valuation = date(2019, 8, 12);
    let (deposits, _) = strip(valuation);
    let insts = instruments(&deposits, &[]);
    let curve = bootstrap_discount_curve(valuation, &insts, &BootstrapConfig::default()).unwrap();
    for (dep, &df) in deposits.iter().zip(&curve.dfs()[1..]) {
        assert_eq!(df, 1.0 / (1.0 + dep.rate * dep.accrual()));
    }
}

#[test]
fn non_convergence_names_the_instrument() {
    let valuation = date(2019, 8, 12);
    let (deposits, mut swaps) = strip(valuation);
    // A quote no positive discount factor can reach.
    swaps[2].rate = -5.0;
    let insts = instruments(&deposits, &swaps);
    match bootstrap_discount_curve(valuation, &insts, &BootstrapConfig::default()) {
        Err(Error::CalibrationFailure { instrument, .. }) => {
            assert_eq!(instrument, swaps[2].describe())
        }
        other => panic!("expected a calibration failure, got {other:?}"),
    }
}

#[test]
fn maturities_must_follow_valuation() {
    let valuation = date(2019, 8, 12);
    let dep = TestDeposit {
        start: date(2019, 8, 1),
        end: valuation,
        rate: 0.02,
    };
    let err = bootstrap_discount_curve(valuation, &[&dep], &BootstrapConfig::default())
        .unwrap_err();
    assert!(err.is_bad_input());
}

#[test]
fn reference_period_day_count_is_rejected() {
    let valuation = date(2019, 8, 12);
    let (deposits, swaps) = strip(valuation);
    let insts = instruments(&deposits, &swaps);
    let config = BootstrapConfig::default().with_day_count(DayCountType::ActActIcma);
    let err = bootstrap_discount_curve(valuation, &insts, &config).unwrap_err();
    assert!(err.is_bad_input(), "{err}");
}
