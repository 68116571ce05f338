//! Error types for fincurve.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! is one of a small set of kinds: bad input, unsupported combinations, and
//! calibration failures. Non-fatal numerical conditions are not errors; they
//! go through [`numerical_warning!`](crate::numerical_warning) instead.

use crate::Real;
use thiserror::Error;

/// The top-level error type used throughout fincurve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed date, tenor, or enumeration; non-monotone abscissas;
    /// out-of-domain parameters such as a negative volatility.
    #[error("bad input: {0}")]
    BadInput(String),

    /// A combination of options that is not implemented.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A calibration could not reprice one of its instruments.
    #[error("calibration failed for {instrument} (residual {residual:e}): {reason}")]
    CalibrationFailure {
        /// Description of the instrument that failed.
        instrument: String,
        /// The last residual seen by the solver.
        residual: Real,
        /// What went wrong.
        reason: String,
    },

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },
}

impl Error {
    /// Wrap this error as a calibration failure for `instrument`.
    ///
    /// A calibration failure passed in is returned with its instrument
    /// replaced, keeping the residual.
    pub fn into_calibration_failure(self, instrument: impl Into<String>) -> Self {
        let instrument = instrument.into();
        match self {
            Error::CalibrationFailure {
                residual, reason, ..
            } => Error::CalibrationFailure {
                instrument,
                residual,
                reason,
            },
            other => Error::CalibrationFailure {
                instrument,
                residual: Real::NAN,
                reason: other.to_string(),
            },
        }
    }

    /// Return `true` for [`Error::BadInput`].
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Error::BadInput(_))
    }
}

/// Shorthand `Result` type used throughout fincurve.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::BadInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fc_core::ensure;
/// fn positive(x: f64) -> fc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::BadInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::BadInput(...))` immediately.
///
/// # Example
/// ```
/// use fc_core::fail;
/// fn always_err() -> fc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::BadInput(format!($($msg)*)))
    };
}

/// Return `Err(Error::Unsupported(...))` immediately.
///
/// # Example
/// ```
/// use fc_core::{errors::Error, unsupported};
/// fn no_way() -> fc_core::errors::Result<()> {
///     unsupported!("no analytic forward for {}", "this curve");
/// }
/// assert!(matches!(no_way(), Err(Error::Unsupported(_))));
/// ```
#[macro_export]
macro_rules! unsupported {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Unsupported(format!($($msg)*)))
    };
}

/// Report a non-fatal numerical condition (negative implied forward, very
/// flat swap, ...).
///
/// Logs a `WARN` event on the `fincurve::numerical` target and never
/// interrupts the caller.
#[macro_export]
macro_rules! numerical_warning {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: "fincurve::numerical", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(x: f64) -> Result<f64> {
        crate::ensure!(x.is_finite(), "non-finite input {x}");
        Ok(x)
    }

    #[test]
    fn ensure_produces_bad_input() {
        assert!(checked(1.0).is_ok());
        let err = checked(f64::NAN).unwrap_err();
        assert!(err.is_bad_input());
        assert!(err.to_string().starts_with("bad input"));
    }

    #[test]
    fn wrap_into_calibration_failure() {
        let err = Error::BadInput("negative rate".into()).into_calibration_failure("5Y swap");
        match err {
            Error::CalibrationFailure {
                instrument, reason, ..
            } => {
                assert_eq!(instrument, "5Y swap");
                assert!(reason.contains("negative rate"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rewrap_keeps_residual() {
        let err = Error::CalibrationFailure {
            instrument: "pillar 3".into(),
            residual: 1.5e-3,
            reason: "no convergence".into(),
        }
        .into_calibration_failure("10Y swap");
        assert!(matches!(
            err,
            Error::CalibrationFailure { residual, ref instrument, .. }
                if residual == 1.5e-3 && instrument == "10Y swap"
        ));
    }
}
