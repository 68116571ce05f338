//! Cubic interpolation schemes.
//!
//! Both schemes reduce to a piecewise cubic Hermite polynomial once the node
//! slopes are known:
//!
//! - **Natural spline**: C² with zero second derivative at both ends; the
//!   slopes follow from a tridiagonal solve, so every node influences every
//!   segment.
//! - **Fritsch–Butland**: local, monotonicity-preserving (PCHIP) slopes from
//!   a weighted harmonic mean of the adjacent secants.

use fc_core::{Real, Result};

use super::{check_nodes, locate, Interpolation1D};

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Piecewise cubic in the form `y_i + dx*(a_i + dx*(b_i + dx*c_i))`,
/// `dx = x - x_i`.
#[derive(Debug, Clone)]
struct HermitePolynomial {
    xs: Vec<Real>,
    ys: Vec<Real>,
    a: Vec<Real>,
    b: Vec<Real>,
    c: Vec<Real>,
}

impl HermitePolynomial {
    /// Convert node slopes `ts` into polynomial coefficients.
    fn from_slopes(xs: Vec<Real>, ys: Vec<Real>, ts: &[Real]) -> Self {
        let n = xs.len();
        let mut a = Vec::with_capacity(n - 1);
        let mut b = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let dx = xs[i + 1] - xs[i];
            let s = (ys[i + 1] - ys[i]) / dx;
            a.push(ts[i]);
            b.push((3.0 * s - ts[i + 1] - 2.0 * ts[i]) / dx);
            c.push((ts[i + 1] + ts[i] - 2.0 * s) / (dx * dx));
        }
        Self { xs, ys, a, b, c }
    }

    fn value(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.ys[i] + dx * (self.a[i] + dx * (self.b[i] + dx * self.c[i]))
    }

    fn derivative(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.a[i] + dx * (2.0 * self.b[i] + 3.0 * dx * self.c[i])
    }

    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}

/// Interval widths and secant slopes.
fn secants(xs: &[Real], ys: &[Real]) -> (Vec<Real>, Vec<Real>) {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| {
            let h = x[1] - x[0];
            (h, (y[1] - y[0]) / h)
        })
        .unzip()
}

/// Hyman monotonicity correction on the boundary slopes.
///
/// Each end slope takes the sign of its adjacent secant and is capped at
/// three times its magnitude.
fn hyman_boundary_correction(ts: &mut [Real], s: &[Real]) {
    let n = ts.len();
    for (t, secant) in [(0, s[0]), (n - 1, s[n - 2])] {
        if ts[t] * secant <= 0.0 {
            ts[t] = 0.0;
        } else if ts[t].abs() > 3.0 * secant.abs() {
            ts[t] = ts[t].signum() * 3.0 * secant.abs();
        }
    }
}

// ── Natural cubic spline ──────────────────────────────────────────────────────

/// Natural cubic spline: C² with `f''(x_0) = f''(x_{n-1}) = 0`.
///
/// Holds the node second derivatives alongside the Hermite coefficients.
#[derive(Debug, Clone)]
pub struct CubicNaturalSpline {
    poly: HermitePolynomial,
    second_derivatives: Vec<Real>,
}

impl CubicNaturalSpline {
    /// Fit a natural cubic spline through at least 2 points.
    ///
    /// With exactly 2 points the spline is the straight line through them.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys, 2)?;
        let n = xs.len();
        let (h, s) = secants(xs, ys);

        // Thomas algorithm on the interior second derivatives M_1..M_{n-2}.
        let mut m = vec![0.0; n];
        if n > 2 {
            let interior = n - 2;
            let mut diag = Vec::with_capacity(interior);
            let mut rhs = Vec::with_capacity(interior);
            for k in 1..n - 1 {
                diag.push(2.0 * (h[k - 1] + h[k]));
                rhs.push(6.0 * (s[k] - s[k - 1]));
            }
            for k in 1..interior {
                let w = h[k] / diag[k - 1];
                diag[k] -= w * h[k];
                rhs[k] -= w * rhs[k - 1];
            }
            m[interior] = rhs[interior - 1] / diag[interior - 1];
            for k in (1..interior).rev() {
                m[k] = (rhs[k - 1] - h[k] * m[k + 1]) / diag[k - 1];
            }
        }

        let mut ts: Vec<Real> = (0..n - 1)
            .map(|i| s[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0)
            .collect();
        ts.push(s[n - 2] + h[n - 2] * (m[n - 2] + 2.0 * m[n - 1]) / 6.0);

        Ok(Self {
            poly: HermitePolynomial::from_slopes(xs.to_vec(), ys.to_vec(), &ts),
            second_derivatives: m,
        })
    }

    /// Second derivative at each node; zero at both ends.
    pub fn second_derivatives(&self) -> &[Real] {
        &self.second_derivatives
    }
}

impl Interpolation1D for CubicNaturalSpline {
    fn operator(&self, x: Real) -> Real {
        self.poly.value(x)
    }

    fn derivative(&self, x: Real) -> Real {
        self.poly.derivative(x)
    }

    fn x_min(&self) -> Real {
        self.poly.x_min()
    }

    fn x_max(&self) -> Real {
        self.poly.x_max()
    }
}

// ── Fritsch–Butland ───────────────────────────────────────────────────────────

/// Fritsch–Butland cubic interpolation (local, monotonicity-preserving).
///
/// Interior slopes are the weighted harmonic mean of the adjacent secants,
/// or zero at a local extremum of the data. End slopes use the three-point
/// parabolic formula followed by the Hyman correction.
#[derive(Debug, Clone)]
pub struct FritschButlandCubic {
    poly: HermitePolynomial,
}

impl FritschButlandCubic {
    /// Build a Fritsch–Butland cubic through at least 2 points.
    ///
    /// With exactly 2 points the result is the straight line through them.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys, 2)?;
        let n = xs.len();
        let (dx, s) = secants(xs, ys);

        let ts = if n == 2 {
            vec![s[0], s[0]]
        } else {
            let mut ts = vec![0.0; n];
            for i in 1..n - 1 {
                if s[i - 1] * s[i] > 0.0 {
                    let s_min = s[i - 1].abs().min(s[i].abs());
                    let s_max = s[i - 1].abs().max(s[i].abs());
                    ts[i] = s[i].signum() * 3.0 * s_min * s_max / (s_max + 2.0 * s_min);
                }
            }
            ts[0] = ((2.0 * dx[0] + dx[1]) * s[0] - dx[0] * s[1]) / (dx[0] + dx[1]);
            ts[n - 1] = ((2.0 * dx[n - 2] + dx[n - 3]) * s[n - 2] - dx[n - 2] * s[n - 3])
                / (dx[n - 2] + dx[n - 3]);
            hyman_boundary_correction(&mut ts, &s);
            ts
        };

        Ok(Self {
            poly: HermitePolynomial::from_slopes(xs.to_vec(), ys.to_vec(), &ts),
        })
    }
}

impl Interpolation1D for FritschButlandCubic {
    fn operator(&self, x: Real) -> Real {
        self.poly.value(x)
    }

    fn derivative(&self, x: Real) -> Real {
        self.poly.derivative(x)
    }

    fn x_min(&self) -> Real {
        self.poly.x_min()
    }

    fn x_max(&self) -> Real {
        self.poly.x_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn natural_spline_reproduces_nodes() {
        let xs = [0.0, 0.5, 1.5, 3.0, 5.0];
        let ys = [1.0, 0.2, -0.4, 2.0, 2.5];
        let spline = CubicNaturalSpline::new(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert_abs_diff_eq!(spline.operator(x), y, epsilon = 1e-13);
        }
        let m = spline.second_derivatives();
        assert_eq!(m[0], 0.0);
        assert_eq!(m[4], 0.0);
    }

    #[test]
    fn natural_spline_is_c2() {
        let xs = [0.0, 1.0, 2.5, 4.0];
        let ys = [0.0, 1.0, 0.5, 3.0];
        let spline = CubicNaturalSpline::new(&xs, &ys).unwrap();
        let eps = 1e-6;
        for &x in &xs[1..3] {
            let left = spline.derivative(x - eps);
            let right = spline.derivative(x + eps);
            assert_abs_diff_eq!(left, right, epsilon = 1e-4);
        }
    }

    #[test]
    fn natural_spline_reproduces_straight_lines() {
        let xs = [0.0, 1.0, 3.0, 4.0];
        let ys: Vec<Real> = xs.iter().map(|x| 2.0 * x - 1.0).collect();
        let spline = CubicNaturalSpline::new(&xs, &ys).unwrap();
        assert_abs_diff_eq!(spline.operator(2.2), 3.4, epsilon = 1e-13);
        assert_abs_diff_eq!(spline.derivative(3.7), 2.0, epsilon = 1e-13);
    }

    #[test]
    fn two_point_schemes_are_linear() {
        let spline = CubicNaturalSpline::new(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        let pchip = FritschButlandCubic::new(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        assert_abs_diff_eq!(spline.operator(2.0), 4.0, epsilon = 1e-14);
        assert_abs_diff_eq!(pchip.operator(2.5), 5.0, epsilon = 1e-14);
    }

    #[test]
    fn fritsch_butland_preserves_monotonicity() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [0.0, 0.1, 0.15, 2.0, 2.05, 2.1];
        let pchip = FritschButlandCubic::new(&xs, &ys).unwrap();
        let mut prev = pchip.operator(0.0);
        for k in 1..=500 {
            let v = pchip.operator(5.0 * k as Real / 500.0);
            assert!(v >= prev - 1e-14, "non-monotone at step {k}");
            prev = v;
        }
    }

    #[test]
    fn fritsch_butland_flat_at_extrema() {
        let pchip = FritschButlandCubic::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(pchip.derivative(1.0), 0.0, epsilon = 1e-14);
        assert!(pchip.operator(0.5) <= 1.0);
    }
}
