//! One-dimensional root finders.
//!
//! Objectives are fallible: an error raised while evaluating `f` is returned
//! unchanged. Running out of iterations is a
//! [`CalibrationFailure`](fc_core::Error::CalibrationFailure) carrying the
//! smallest residual seen, so callers can re-label it with the instrument
//! being solved for.

use std::cell::Cell;

use fc_core::{ensure, Error, Real, Result};

/// Iteration cap shared by the solvers.
pub const MAX_ITERATIONS: u32 = 50;

const DEFAULT_ACCURACY: Real = 1.0e-11;

fn no_convergence(solver: &str, residual: Real, iterations: u32) -> Error {
    Error::CalibrationFailure {
        instrument: "root finder".into(),
        residual,
        reason: format!("{solver} did not converge in {iterations} evaluations"),
    }
}

// ── Safeguarded secant ────────────────────────────────────────────────────────

/// Secant iteration with a bisection fallback.
///
/// Starting from `guess`, a bracket is grown geometrically (half-width
/// `max(|guess|/2, 1e-4)`, doubling) inside `[lower, upper]` until `f`
/// changes sign. Secant steps that leave the bracket are replaced by
/// bisection. Converges when `|f(x)| < tolerance`; every evaluation of `f`
/// counts against `max_iterations`.
pub fn safeguarded_secant<F>(
    mut f: F,
    guess: Real,
    lower: Real,
    upper: Real,
    tolerance: Real,
    max_iterations: u32,
) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    ensure!(lower < upper, "empty search domain [{lower}, {upper}]");
    ensure!(
        guess.is_finite() && guess >= lower && guess <= upper,
        "initial guess {guess} outside [{lower}, {upper}]"
    );
    let tol = if tolerance > 0.0 { tolerance } else { DEFAULT_ACCURACY };

    let evaluations = Cell::new(0_u32);
    let mut eval = |x: Real| -> Result<Real> {
        evaluations.set(evaluations.get() + 1);
        let fx = f(x)?;
        ensure!(fx.is_finite(), "objective is not finite at {x}");
        Ok(fx)
    };

    let fg = eval(guess)?;
    if fg.abs() < tol {
        return Ok(guess);
    }
    let mut best = (guess, fg);

    // Bracket.
    let mut half_width = (0.5 * guess.abs()).max(1e-4);
    let (mut a, mut fa, mut b, mut fb);
    loop {
        a = (guess - half_width).max(lower);
        b = (guess + half_width).min(upper);
        fa = eval(a)?;
        fb = eval(b)?;
        for (x, fx) in [(a, fa), (b, fb)] {
            if fx.abs() < best.1.abs() {
                best = (x, fx);
            }
        }
        if fa.abs() < tol {
            return Ok(a);
        }
        if fb.abs() < tol {
            return Ok(b);
        }
        if fa * fb < 0.0 {
            break;
        }
        if (a <= lower && b >= upper) || evaluations.get() + 2 > max_iterations {
            return Err(no_convergence("bracketing", best.1.abs(), evaluations.get()));
        }
        half_width *= 2.0;
    }

    // Secant from the two best points, confined to [a, b].
    let (mut x0, mut f0, mut x1, mut f1) = if fa.abs() < fb.abs() {
        (b, fb, a, fa)
    } else {
        (a, fa, b, fb)
    };
    while evaluations.get() < max_iterations {
        let secant = x1 - f1 * (x1 - x0) / (f1 - f0);
        let x = if secant.is_finite() && secant > a && secant < b {
            secant
        } else {
            0.5 * (a + b)
        };
        let fx = eval(x)?;
        if fx.abs() < best.1.abs() {
            best = (x, fx);
        }
        if fx.abs() < tol {
            return Ok(x);
        }
        if fa * fx < 0.0 {
            b = x;
        } else {
            a = x;
            fa = fx;
        }
        if b - a <= Real::EPSILON * (1.0 + x.abs()) {
            break;
        }
        (x0, f0, x1, f1) = (x1, f1, x, fx);
    }
    Err(no_convergence("secant", best.1.abs(), evaluations.get()))
}

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for a root of `f` in `[x_min, x_max]`.
///
/// Combines bisection, secant and inverse quadratic interpolation.
///
/// # Errors
/// `BadInput` unless `f(x_min)` and `f(x_max)` have opposite signs.
pub fn brent<F>(mut f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    let acc = if accuracy > 0.0 { accuracy } else { DEFAULT_ACCURACY };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    ensure!(
        fa * fb <= 0.0,
        "Brent: f({a}) = {fa} and f({b}) = {fb} must have opposite signs"
    );
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * Real::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b)?;
    }
    Err(no_convergence("Brent", fb.abs(), MAX_ITERATIONS))
}
