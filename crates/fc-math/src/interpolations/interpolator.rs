//! Discount-factor interpolation under curve conventions.
//!
//! An [`Interpolator`] is fitted once from `(time, discount factor)` nodes
//! and then answers discount factors and instantaneous forwards at any time.
//! The [`InterpKind`] decides which quantity is interpolated: forward rates,
//! continuously compounded zero rates, or log discount factors.

use std::str::FromStr;

use fc_core::{ensure, fail, DiscountFactor, Error, Rate, Real, Result, Time};

use super::cubic::{CubicNaturalSpline, FritschButlandCubic};
use super::{locate, Interpolation1D, LinearInterpolation};

/// The interpolation rule of a discount curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpKind {
    /// Piecewise-constant instantaneous forwards (log-linear discount factors).
    #[default]
    FlatFwdRates,
    /// Instantaneous forwards linear in time inside each interval, blending
    /// the previous and current interval averages.
    LinearFwdRates,
    /// Zero rates linear in time.
    LinearZeroRates,
    /// Natural cubic spline on zero rates.
    CubicZeroRates,
    /// Natural cubic spline on log discount factors.
    NatCubicLogDf,
    /// Monotone (Fritsch–Butland) cubic on zero rates.
    PchipZeroRates,
    /// Monotone (Fritsch–Butland) cubic on log discount factors.
    PchipLogDf,
}

impl InterpKind {
    /// All kinds, in declaration order.
    pub const ALL: [InterpKind; 7] = [
        InterpKind::FlatFwdRates,
        InterpKind::LinearFwdRates,
        InterpKind::LinearZeroRates,
        InterpKind::CubicZeroRates,
        InterpKind::NatCubicLogDf,
        InterpKind::PchipZeroRates,
        InterpKind::PchipLogDf,
    ];

    /// Upper-case name, e.g. `"FLAT_FWD_RATES"`.
    pub fn name(&self) -> &'static str {
        match self {
            InterpKind::FlatFwdRates => "FLAT_FWD_RATES",
            InterpKind::LinearFwdRates => "LINEAR_FWD_RATES",
            InterpKind::LinearZeroRates => "LINEAR_ZERO_RATES",
            InterpKind::CubicZeroRates => "CUBIC_ZERO_RATES",
            InterpKind::NatCubicLogDf => "NAT_CUBIC_LOG_DF",
            InterpKind::PchipZeroRates => "PCHIP_ZERO_RATES",
            InterpKind::PchipLogDf => "PCHIP_LOG_DF",
        }
    }

    /// `true` when a node only shapes the intervals up to the next node.
    ///
    /// Non-local kinds let a new node move earlier segments, so a
    /// sequential bootstrap has to sweep until the pillars settle.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            InterpKind::FlatFwdRates | InterpKind::LinearFwdRates | InterpKind::LinearZeroRates
        )
    }
}

impl FromStr for InterpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match InterpKind::ALL.iter().find(|k| k.name() == key) {
            Some(&k) => Ok(k),
            None => fail!("unknown interpolation kind '{s}'"),
        }
    }
}

impl std::fmt::Display for InterpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ── Fitted state ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Curve1D {
    Linear(LinearInterpolation),
    Natural(CubicNaturalSpline),
    Pchip(FritschButlandCubic),
}

impl Curve1D {
    fn as_dyn(&self) -> &dyn Interpolation1D {
        match self {
            Curve1D::Linear(c) => c,
            Curve1D::Natural(c) => c,
            Curve1D::Pchip(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
enum Scheme {
    /// Average forward per interval.
    FlatForward { fwds: Vec<Rate> },
    /// Average forward per interval; the instantaneous forward in interval
    /// `i` is `F_i + (F_i − F_{i−1})·(w − ½)`.
    LinearForward { fwds: Vec<Rate> },
    ZeroRate { zeros: Curve1D },
    LogDiscount { log_dfs: Curve1D },
}

/// Discount factors interpolated from `(time, DF)` nodes.
///
/// Fitted eagerly at construction; evaluation never allocates.
#[derive(Debug, Clone)]
pub struct Interpolator {
    kind: InterpKind,
    times: Vec<Time>,
    dfs: Vec<DiscountFactor>,
    log_dfs: Vec<Real>,
    scheme: Scheme,
}

impl Interpolator {
    /// Fit `kind` to the nodes.
    ///
    /// # Errors
    /// `BadInput` unless there are at least two nodes, the lengths match,
    /// the times are finite, non-negative and strictly increasing, and the
    /// discount factors are finite and positive. A node at `t = 0` must
    /// carry a discount factor of 1.
    pub fn fit(kind: InterpKind, times: &[Time], dfs: &[DiscountFactor]) -> Result<Self> {
        ensure!(
            times.len() == dfs.len(),
            "times and discount factors differ in length ({} vs {})",
            times.len(),
            dfs.len()
        );
        ensure!(times.len() >= 2, "need at least two nodes, got {}", times.len());
        ensure!(
            times.iter().all(|t| t.is_finite()) && times[0] >= 0.0,
            "node times must be finite and non-negative"
        );
        ensure!(
            times.windows(2).all(|w| w[0] < w[1]),
            "node times must be strictly increasing"
        );
        if let Some(bad) = dfs.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            fail!("discount factors must be positive, got {bad}");
        }
        ensure!(
            times[0] > 0.0 || (dfs[0] - 1.0).abs() <= 1e-12,
            "the node at t = 0 must have discount factor 1, got {}",
            dfs[0]
        );

        let log_dfs: Vec<Real> = dfs.iter().map(|d| d.ln()).collect();
        let interval_fwds = || -> Vec<Rate> {
            times
                .windows(2)
                .zip(log_dfs.windows(2))
                .map(|(t, l)| (l[0] - l[1]) / (t[1] - t[0]))
                .collect()
        };
        let scheme = match kind {
            InterpKind::FlatFwdRates => Scheme::FlatForward {
                fwds: interval_fwds(),
            },
            InterpKind::LinearFwdRates => Scheme::LinearForward {
                fwds: interval_fwds(),
            },
            InterpKind::LinearZeroRates | InterpKind::CubicZeroRates | InterpKind::PchipZeroRates => {
                let mut zeros: Vec<Rate> = times
                    .iter()
                    .zip(&log_dfs)
                    .map(|(&t, &l)| if t > 0.0 { -l / t } else { 0.0 })
                    .collect();
                if times[0] == 0.0 {
                    zeros[0] = zeros[1];
                }
                Scheme::ZeroRate {
                    zeros: fit_curve(kind, times, &zeros)?,
                }
            }
            InterpKind::NatCubicLogDf | InterpKind::PchipLogDf => Scheme::LogDiscount {
                log_dfs: fit_curve(kind, times, &log_dfs)?,
            },
        };

        Ok(Self {
            kind,
            times: times.to_vec(),
            dfs: dfs.to_vec(),
            log_dfs,
            scheme,
        })
    }

    /// The interpolation rule.
    pub fn kind(&self) -> InterpKind {
        self.kind
    }

    /// Node times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Node discount factors.
    pub fn dfs(&self) -> &[DiscountFactor] {
        &self.dfs
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; an interpolator holds at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Discount factor at `t`.
    pub fn interpolate(&self, t: Time) -> DiscountFactor {
        self.log_df(t).exp()
    }

    /// Fill `out[k]` with the discount factor at `times[k]`.
    ///
    /// # Errors
    /// `BadInput` if the slices differ in length.
    pub fn interpolate_into(&self, times: &[Time], out: &mut [DiscountFactor]) -> Result<()> {
        ensure!(
            times.len() == out.len(),
            "output buffer holds {} values for {} times",
            out.len(),
            times.len()
        );
        for (o, &t) in out.iter_mut().zip(times) {
            *o = self.interpolate(t);
        }
        Ok(())
    }

    /// Instantaneous forward rate at `t`, `−d ln D / dt`.
    pub fn forward(&self, t: Time) -> Rate {
        let n = self.times.len();
        let (first, last) = (self.times[0], self.times[n - 1]);
        match &self.scheme {
            Scheme::FlatForward { fwds } => fwds[locate(&self.times, t)],
            Scheme::LinearForward { fwds } => {
                if t <= first {
                    fwds[0]
                } else {
                    let i = locate(&self.times, t.min(last));
                    let (f, df, w) = self.linear_fwd_segment(fwds, i, t.min(last));
                    f + df * (w - 0.5)
                }
            }
            Scheme::ZeroRate { zeros } => {
                let zeros = zeros.as_dyn();
                if t <= first || t >= last {
                    zeros.operator(t.clamp(first, last))
                } else {
                    zeros.operator(t) + t * zeros.derivative(t)
                }
            }
            Scheme::LogDiscount { log_dfs } => {
                -log_dfs.as_dyn().derivative(t.clamp(first, last))
            }
        }
    }

    fn linear_fwd_segment(&self, fwds: &[Rate], i: usize, t: Time) -> (Rate, Rate, Real) {
        let previous = if i == 0 { fwds[0] } else { fwds[i - 1] };
        let h = self.times[i + 1] - self.times[i];
        (fwds[i], fwds[i] - previous, (t - self.times[i]) / h)
    }

    fn log_df(&self, t: Time) -> Real {
        let n = self.times.len();
        let (first, last) = (self.times[0], self.times[n - 1]);
        match &self.scheme {
            Scheme::FlatForward { fwds } => {
                let i = locate(&self.times, t);
                self.log_dfs[i] - fwds[i] * (t - self.times[i])
            }
            Scheme::LinearForward { fwds } => {
                if t <= first {
                    return self.log_dfs[0] - fwds[0] * (t - first);
                }
                if t >= last {
                    let end_fwd = self.forward(last);
                    return self.log_dfs[n - 1] - end_fwd * (t - last);
                }
                let i = locate(&self.times, t);
                let (f, df, w) = self.linear_fwd_segment(fwds, i, t);
                let h = self.times[i + 1] - self.times[i];
                self.log_dfs[i] - h * (f * w + 0.5 * df * (w * w - w))
            }
            Scheme::ZeroRate { zeros } => -zeros.as_dyn().operator(t.clamp(first, last)) * t,
            Scheme::LogDiscount { log_dfs } => {
                let curve = log_dfs.as_dyn();
                if t < first {
                    self.log_dfs[0] + curve.derivative(first) * (t - first)
                } else if t > last {
                    self.log_dfs[n - 1] + curve.derivative(last) * (t - last)
                } else {
                    curve.operator(t)
                }
            }
        }
    }
}

fn fit_curve(kind: InterpKind, xs: &[Real], ys: &[Real]) -> Result<Curve1D> {
    Ok(match kind {
        InterpKind::CubicZeroRates | InterpKind::NatCubicLogDf => {
            Curve1D::Natural(CubicNaturalSpline::new(xs, ys)?)
        }
        InterpKind::PchipZeroRates | InterpKind::PchipLogDf => {
            Curve1D::Pchip(FritschButlandCubic::new(xs, ys)?)
        }
        _ => Curve1D::Linear(LinearInterpolation::new(xs, ys)?),
    })
}
