//! Single-name credit default swap.
//!
//! The premium leg pays a running coupon quarterly (ACT/360) with accrual
//! on default approximated at period midpoints. The protection leg
//! integrates `−D dQ` on a grid no coarser than [`PROTECTION_STEP_DAYS`],
//! refined at every credit-curve pillar. Inside each sub-interval both the
//! hazard and the short rate are taken flat, which gives a closed form.

use fc_core::{ensure, MarketInput, PricingContext, Probability, Real, Result, Spread};
use fc_termstructures::{CreditCalibrationInstrument, CreditCurve, TermStructure};
use fc_time::{
    BusinessDayConvention, CalendarType, Date, DateGeneration, DayCountType, Frequency, Schedule,
    ScheduleBuilder, Tenor,
};

use crate::instrument::{Instrument, Priceable, PricingResults};

/// Calendar days per protection sub-interval (at most 25 per year).
pub const PROTECTION_STEP_DAYS: i32 = 15;

const PREMIUM_DAY_COUNT: DayCountType = DayCountType::Act360;

/// A CDS contract. The protection buyer is long protection.
#[derive(Debug, Clone, PartialEq)]
pub struct Cds {
    step_in: Date,
    maturity: Date,
    coupon: Spread,
    notional: Real,
    recovery: Real,
    long_protection: bool,
    schedule: Schedule,
}

impl Cds {
    /// A contract accruing from `step_in` to `maturity`.
    ///
    /// # Errors
    /// `BadInput` unless `step_in < maturity`, the coupon is finite, the
    /// notional is non-zero and `0 ≤ recovery < 1`.
    pub fn new(
        step_in: Date,
        maturity: Date,
        coupon: Spread,
        notional: Real,
        recovery: Real,
        long_protection: bool,
    ) -> Result<Self> {
        ensure!(coupon.is_finite(), "CDS coupon must be finite");
        ensure!(
            notional.is_finite() && notional != 0.0,
            "CDS notional must be finite and non-zero"
        );
        ensure!(
            (0.0..1.0).contains(&recovery),
            "recovery rate must lie in [0, 1), got {recovery}"
        );
        let schedule = ScheduleBuilder::new(step_in, maturity, Frequency::Quarterly, &CalendarType::Weekend)
            .with_convention(BusinessDayConvention::Following)
            .with_rule(DateGeneration::Backward)
            .adjust_termination(false)
            .build()?;
        Ok(Self {
            step_in,
            maturity,
            coupon,
            notional,
            recovery,
            long_protection,
            schedule,
        })
    }

    /// A standard contract maturing on the CDS roll date at least `tenor`
    /// after `step_in`.
    pub fn from_tenor(
        step_in: Date,
        tenor: &str,
        coupon: Spread,
        notional: Real,
        recovery: Real,
        long_protection: bool,
    ) -> Result<Self> {
        let parsed = Tenor::parse(tenor)?;
        let Some(months) = parsed.months() else {
            fc_core::fail!("CDS tenor must be a representable number of months or years, got {parsed}");
        };
        let maturity = step_in.next_cds_date(months)?;
        Self::new(step_in, maturity, coupon, notional, recovery, long_protection)
    }

    /// Protection start and premium accrual start.
    pub fn step_in(&self) -> Date {
        self.step_in
    }

    /// Running coupon.
    pub fn coupon(&self) -> Spread {
        self.coupon
    }

    /// The contract's own recovery assumption.
    pub fn recovery(&self) -> Real {
        self.recovery
    }

    /// Whether this side buys protection.
    pub fn is_long_protection(&self) -> bool {
        self.long_protection
    }

    /// Premium payment schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Recovery used for pricing, overridable through `recovery_rate`.
    pub fn effective_recovery(&self) -> Result<Real> {
        let r = PricingContext::value_or(MarketInput::RecoveryRate, self.recovery);
        ensure!(
            (0.0..1.0).contains(&r),
            "recovery rate must lie in [0, 1), got {r}"
        );
        Ok(r)
    }

    /// PV of one unit of running spread per unit notional, including
    /// accrual on default.
    pub fn risky_pv01(&self, curve: &CreditCurve) -> Real {
        let valuation = curve.valuation_date();
        let mut rpv01 = 0.0;
        for (start, end) in self.schedule.periods() {
            if end <= valuation {
                continue;
            }
            let alpha = PREMIUM_DAY_COUNT.year_fraction(start, end);
            let q_end = curve.survival_prob(end);
            rpv01 += alpha * q_end * curve.df(end);

            let from = start.max(valuation);
            let mid = from + from.days_between(end) / 2;
            rpv01 += 0.5 * alpha * curve.df(mid) * (curve.survival_prob(from) - q_end);
        }
        rpv01
    }

    /// PV of a unit default payment per unit notional, before recovery.
    pub fn protection_leg_pv(&self, curve: &CreditCurve) -> Result<Real> {
        let start = self.step_in.max(curve.valuation_date());
        if start >= self.maturity {
            return Ok(0.0);
        }
        let mut grid = vec![start];
        let mut d = start;
        loop {
            d = d.add_days(PROTECTION_STEP_DAYS)?;
            if d >= self.maturity {
                break;
            }
            grid.push(d);
        }
        grid.extend(
            curve
                .dates()
                .iter()
                .copied()
                .filter(|&p| p > start && p < self.maturity),
        );
        grid.push(self.maturity);
        grid.sort_unstable();
        grid.dedup();

        let mut pv = 0.0;
        let mut qa = curve.survival_prob(grid[0]);
        let mut da = curve.df(grid[0]);
        for &b in &grid[1..] {
            let (qb, db) = (curve.survival_prob(b), curve.df(b));
            pv += segment_protection(qa, da, qb, db);
            (qa, da) = (qb, db);
        }
        Ok(pv)
    }

    /// Spread at which the contract is worth nothing on `curve`.
    pub fn par_spread(&self, curve: &CreditCurve) -> Result<Spread> {
        let rpv01 = self.risky_pv01(curve);
        ensure!(rpv01 > 0.0, "CDS has no remaining premium leg");
        Ok((1.0 - self.effective_recovery()?) * self.protection_leg_pv(curve)? / rpv01)
    }

    /// PV to the protection buyer: `N·((1 − R)·protection − c·RPV01)`.
    fn buyer_pv(&self, curve: &CreditCurve) -> Result<Real> {
        let lgd = 1.0 - self.effective_recovery()?;
        Ok(self.notional * (lgd * self.protection_leg_pv(curve)? - self.coupon * self.risky_pv01(curve)))
    }

    /// PV with leg values and the par spread.
    pub fn results(&self, curve: &CreditCurve) -> Result<PricingResults> {
        let lgd = 1.0 - self.effective_recovery()?;
        let protection = self.notional * lgd * self.protection_leg_pv(curve)?;
        let rpv01 = self.risky_pv01(curve);
        Ok(PricingResults::from_npv(self.price(curve)?)
            .with_result("protection_leg", protection)
            .with_result("premium_leg", self.notional * self.coupon * rpv01)
            .with_result("risky_pv01", rpv01)
            .with_result("par_spread", self.par_spread(curve)?))
    }
}

/// `∫ −D dQ` over one sub-interval with flat hazard and flat short rate.
fn segment_protection(qa: Probability, da: Real, qb: Probability, db: Real) -> Real {
    let dq = (qa / qb).ln();
    if dq == 0.0 {
        return 0.0;
    }
    let total = dq + (da / db).ln();
    if total.abs() < 1e-12 {
        qa * da * dq
    } else {
        dq / total * (qa * da - qb * db)
    }
}

impl Instrument for Cds {
    fn maturity_date(&self) -> Date {
        self.maturity
    }
}

impl Priceable for Cds {
    type Market = CreditCurve;

    fn price(&self, curve: &CreditCurve) -> Result<Real> {
        let sign = if self.long_protection { 1.0 } else { -1.0 };
        Ok(sign * self.buyer_pv(curve)?)
    }
}

impl CreditCalibrationInstrument for Cds {
    fn maturity_date(&self) -> Date {
        self.maturity
    }

    fn market_quote(&self) -> Real {
        self.coupon
    }

    fn notional(&self) -> Real {
        self.notional
    }

    fn pv(&self, curve: &CreditCurve) -> Result<Real> {
        self.buyer_pv(curve)
    }

    fn describe(&self) -> String {
        format!(
            "CDS {:?}..{:?} @ {:.2}bp",
            self.step_in,
            self.maturity,
            self.coupon * 1e4
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fc_termstructures::{DiscountCurve, FlatCurve};
    use std::sync::Arc;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat_credit(v: Date, hazard: Real, rate: Real) -> CreditCurve {
        let discount: Arc<dyn DiscountCurve> = Arc::new(FlatCurve::continuous(v, rate).unwrap());
        let end = date(2035, 1, 1);
        let t = DayCountType::Act365F.year_fraction(v, end);
        CreditCurve::new(v, &[end], &[(-hazard * t).exp()], discount, 0.4, DayCountType::Act365F)
            .unwrap()
    }

    #[test]
    fn standard_maturity_and_schedule() {
        let cds = Cds::from_tenor(date(2019, 8, 12), "1Y", 0.01, 1e7, 0.4, true).unwrap();
        assert_eq!(Instrument::maturity_date(&cds), date(2020, 9, 20));
        let dates = cds.schedule().dates();
        assert_eq!(dates[0], date(2019, 8, 12));
        // Unadjusted termination on a Sunday.
        assert_eq!(*dates.last().unwrap(), date(2020, 9, 20));
        assert_eq!(dates.len(), 6);
    }

    #[test]
    fn protection_matches_flat_closed_form() {
        let v = date(2020, 1, 1);
        let (h, r) = (0.02, 0.03);
        let curve = flat_credit(v, h, r);
        let cds = Cds::new(v, date(2025, 1, 1), 0.01, 1.0, 0.4, true).unwrap();
        let t = DayCountType::Act365F.year_fraction(v, date(2025, 1, 1));
        let expected = h / (h + r) * (1.0 - (-(h + r) * t).exp());
        assert_abs_diff_eq!(cds.protection_leg_pv(&curve).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn par_spread_prices_to_zero() {
        let v = date(2020, 1, 1);
        let curve = flat_credit(v, 0.015, 0.01);
        let at_zero = Cds::from_tenor(v, "5Y", 0.0, 1e7, 0.4, true).unwrap();
        let par = at_zero.par_spread(&curve).unwrap();
        // Credit triangle.
        assert_abs_diff_eq!(par, 0.015 * 0.6, epsilon = 3e-4);
        let at_par = Cds::from_tenor(v, "5Y", par, 1e7, 0.4, true).unwrap();
        assert_abs_diff_eq!(at_par.price(&curve).unwrap(), 0.0, epsilon = 1e-6);
        let seller = Cds::from_tenor(v, "5Y", 0.02, 1e7, 0.4, false).unwrap();
        assert!(seller.price(&curve).unwrap() > 0.0);
    }

    #[test]
    fn recovery_override_moves_price() {
        let v = date(2020, 1, 1);
        let curve = flat_credit(v, 0.015, 0.01);
        let cds = Cds::from_tenor(v, "3Y", 0.005, 1e7, 0.4, true).unwrap();
        let base = cds.price(&curve).unwrap();
        let low = PricingContext::scoped(
            fc_core::Overrides::new().with(MarketInput::RecoveryRate, 0.2),
            || cds.price(&curve),
        )
        .unwrap();
        assert!(low > base);
        let bad = PricingContext::scoped(
            fc_core::Overrides::new().with(MarketInput::RecoveryRate, 1.5),
            || cds.price(&curve),
        );
        assert!(bad.unwrap_err().is_bad_input());
    }

    #[test]
    fn rejects_day_tenor() {
        assert!(Cds::from_tenor(date(2020, 1, 1), "10D", 0.01, 1.0, 0.4, true).is_err());
        let huge = Cds::from_tenor(date(2020, 1, 1), "200000000Y", 0.01, 1.0, 0.4, true);
        assert!(huge.unwrap_err().is_bad_input());
    }
}
