//! Error types for numerical integration.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical integration.
///
/// Failing to reach the requested tolerance is not an error: it is reported
/// through [`QuadratureResult::converged`](crate::quadrature::QuadratureResult).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Integration bounds are not finite.
    #[error("Non-finite integration bounds: [{a}, {b}]")]
    NonFiniteBounds {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },

    /// Lower bound lies above the upper bound.
    #[error("Invalid integration interval: lower bound {a} exceeds upper bound {b}")]
    InvertedInterval {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
