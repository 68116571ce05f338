//! Single-curve IBOR discount curve from deposits, FRAs and swaps.

use std::sync::Arc;

use fc_core::{ensure, Rate, Real, Result};
use fc_termstructures::{
    bootstrap_discount_curve, BootstrapConfig, CalibrationInstrument, DiscountCurve,
    InterpolatedDiscountCurve,
};
use fc_time::{Date, DayCountType};

use crate::deposit::Deposit;
use crate::fra::Fra;
use crate::market::RatesMarket;
use crate::swap::{IborSwap, SwapConvention};

/// Notional used for instruments built from quotes.
const QUOTE_NOTIONAL: Real = 1_000_000.0;

/// A bootstrapped curve together with the instruments it reprices.
#[derive(Debug, Clone)]
pub struct IborSingleCurve {
    valuation: Date,
    deposits: Vec<Deposit>,
    fras: Vec<Fra>,
    swaps: Vec<IborSwap>,
    curve: Arc<InterpolatedDiscountCurve>,
}

fn ensure_sorted<T>(kind: &str, items: &[T], maturity: impl Fn(&T) -> Date) -> Result<()> {
    ensure!(
        items.windows(2).all(|w| maturity(&w[0]) < maturity(&w[1])),
        "{kind} must be sorted by strictly increasing maturity"
    );
    Ok(())
}

impl IborSingleCurve {
    /// Bootstrap through every instrument, merged by maturity.
    ///
    /// # Errors
    /// `BadInput` if a list is unsorted or the merged maturities collide;
    /// `CalibrationFailure` from the bootstrap.
    pub fn new(
        valuation: Date,
        deposits: Vec<Deposit>,
        fras: Vec<Fra>,
        swaps: Vec<IborSwap>,
        config: &BootstrapConfig,
    ) -> Result<Self> {
        ensure_sorted("deposits", &deposits, |d| CalibrationInstrument::maturity_date(d))?;
        ensure_sorted("FRAs", &fras, |f| CalibrationInstrument::maturity_date(f))?;
        ensure_sorted("swaps", &swaps, |s| CalibrationInstrument::maturity_date(s))?;

        let mut instruments: Vec<&dyn CalibrationInstrument> = Vec::new();
        instruments.extend(deposits.iter().map(|d| d as &dyn CalibrationInstrument));
        instruments.extend(fras.iter().map(|f| f as &dyn CalibrationInstrument));
        instruments.extend(swaps.iter().map(|s| s as &dyn CalibrationInstrument));
        instruments.sort_by_key(|i| i.maturity_date());

        tracing::debug!(
            deposits = deposits.len(),
            fras = fras.len(),
            swaps = swaps.len(),
            "building IBOR single curve"
        );
        let curve = Arc::new(bootstrap_discount_curve(valuation, &instruments, config)?);
        Ok(Self {
            valuation,
            deposits,
            fras,
            swaps,
            curve,
        })
    }

    /// Build deposits and swaps from `(tenor, rate)` quotes in a named
    /// currency's convention. Everything starts at `valuation`; deposits
    /// accrue ACT/360.
    ///
    /// # Errors
    /// `Unsupported` for a currency without a swap convention, plus the
    /// errors of [`new`](Self::new).
    pub fn from_quotes(
        valuation: Date,
        currency: &str,
        deposit_quotes: &[(&str, Rate)],
        swap_quotes: &[(&str, Rate)],
        config: &BootstrapConfig,
    ) -> Result<Self> {
        let convention = SwapConvention::from_name(currency)?;
        let deposits = deposit_quotes
            .iter()
            .map(|&(tenor, rate)| {
                Deposit::from_tenor(
                    valuation,
                    tenor,
                    rate,
                    DayCountType::Act360,
                    &convention.calendar,
                    QUOTE_NOTIONAL,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let swaps = swap_quotes
            .iter()
            .map(|&(tenor, rate)| {
                IborSwap::from_tenor(valuation, tenor, rate, convention, QUOTE_NOTIONAL, false)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(valuation, deposits, Vec::new(), swaps, config)
    }

    /// Valuation date.
    pub fn valuation_date(&self) -> Date {
        self.valuation
    }

    /// The calibrated curve.
    pub fn curve(&self) -> &Arc<InterpolatedDiscountCurve> {
        &self.curve
    }

    /// The calibrated curve as a pricing market.
    pub fn market(&self) -> RatesMarket {
        RatesMarket::new(Arc::clone(&self.curve) as Arc<dyn DiscountCurve>)
    }

    /// Calibration deposits.
    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    /// Calibration FRAs.
    pub fn fras(&self) -> &[Fra] {
        &self.fras
    }

    /// Calibration swaps.
    pub fn swaps(&self) -> &[IborSwap] {
        &self.swaps
    }

    /// `(description, pv / notional)` for every calibration instrument.
    pub fn repricing_errors(&self) -> Result<Vec<(String, Real)>> {
        let curve = self.curve.as_ref();
        let mut out = Vec::with_capacity(self.deposits.len() + self.fras.len() + self.swaps.len());
        let all = self
            .deposits
            .iter()
            .map(|d| d as &dyn CalibrationInstrument)
            .chain(self.fras.iter().map(|f| f as &dyn CalibrationInstrument))
            .chain(self.swaps.iter().map(|s| s as &dyn CalibrationInstrument));
        for inst in all {
            out.push((inst.describe(), inst.pv(curve)? / inst.notional()));
        }
        Ok(out)
    }
}
