//! Linear least-squares regression.
//!
//! Solves `y = A β + ε` for `β` through an SVD of the design matrix, with
//! singular values below `max(n, m) · ε · σ_max` treated as zero. The design
//! matrix is built from caller-supplied basis functions.

use fc_core::{ensure, Error, Real, Result};
use nalgebra::{DMatrix, DVector};

/// Result of a linear least-squares fit.
#[derive(Debug, Clone)]
pub struct LinearLeastSquares {
    coefficients: Vec<Real>,
    residuals: Vec<Real>,
}

impl LinearLeastSquares {
    /// Fit `y ≈ Σ β_j φ_j(x)` for the basis functions `φ_j`.
    ///
    /// # Errors
    /// `BadInput` if `x` and `y` differ in length, there are fewer
    /// observations than basis functions, or the data are not finite.
    pub fn fit<F>(x: &[Real], y: &[Real], basis: &[F]) -> Result<Self>
    where
        F: Fn(Real) -> Real,
    {
        ensure!(
            x.len() == y.len(),
            "x and y must have the same length ({} vs {})",
            x.len(),
            y.len()
        );
        let design = DMatrix::from_fn(x.len(), basis.len(), |i, j| basis[j](x[i]));
        Self::from_design_matrix(&design, y)
    }

    /// Fit against a pre-built `n × m` design matrix.
    pub fn from_design_matrix(design: &DMatrix<Real>, y: &[Real]) -> Result<Self> {
        let (n, m) = design.shape();
        ensure!(m > 0, "no basis functions");
        ensure!(y.len() == n, "expected {n} observations, got {}", y.len());
        ensure!(n >= m, "{m} basis functions need at least {m} observations, got {n}");
        ensure!(
            design.iter().chain(y).all(|v| v.is_finite()),
            "least-squares data must be finite"
        );

        let svd = design.clone().svd(true, true);
        let sigma_max = svd.singular_values.max();
        let threshold = n.max(m) as Real * Real::EPSILON * sigma_max;
        let rhs = DVector::from_column_slice(y);
        let beta = svd
            .solve(&rhs, threshold)
            .map_err(|e| Error::BadInput(format!("least-squares solve failed: {e}")))?;
        let residuals = &rhs - design * &beta;

        Ok(Self {
            coefficients: beta.iter().copied().collect(),
            residuals: residuals.iter().copied().collect(),
        })
    }

    /// Fitted coefficients, one per basis function.
    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// Residuals `y − A β`.
    pub fn residuals(&self) -> &[Real] {
        &self.residuals
    }

    /// Sum of squared residuals.
    pub fn residual_sum_of_squares(&self) -> Real {
        self.residuals.iter().map(|r| r * r).sum()
    }
}
