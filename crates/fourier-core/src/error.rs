//! Error types for the Fourier approximation engine.

use fourier_math::MathError;
use thiserror::Error;

/// A specialized Result type for approximation operations.
pub type ApproxResult<T> = Result<T, ApproxError>;

/// Errors raised by the approximation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApproxError {
    /// The configuration violates the construction contract.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the violated constraint.
        reason: String,
    },

    /// The base payoff was evaluated outside its period.
    #[error("Point {x} is outside the payoff domain [{x_low}, {x_high}]")]
    OutOfDomain {
        /// The offending point.
        x: f64,
        /// Lower bound of the period.
        x_low: f64,
        /// Upper bound of the period.
        x_high: f64,
    },

    /// The series was evaluated before coefficients were computed.
    #[error("Fourier coefficients have not been computed yet")]
    NotReady,

    /// An evaluation point is not a finite real number.
    #[error("Unsupported input: {value} is not a finite real number")]
    UnsupportedInputType {
        /// The rejected value.
        value: f64,
    },

    /// An analysis was requested on a grid with no points.
    #[error("Evaluation grid is empty")]
    EmptyGrid,

    /// The quadrature layer rejected an integration request.
    #[error("Quadrature error: {0}")]
    Quadrature(#[from] MathError),

    /// A configuration document could not be parsed.
    #[error("Configuration parse error: {0}")]
    Config(String),
}

impl ApproxError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Creates an out-of-domain error.
    #[must_use]
    pub fn out_of_domain(x: f64, x_low: f64, x_high: f64) -> Self {
        Self::OutOfDomain { x, x_low, x_high }
    }

    /// Returns true if the caller can recover by computing coefficients first.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApproxError::out_of_domain(500.0, 0.0, 421.0);
        assert_eq!(
            err.to_string(),
            "Point 500 is outside the payoff domain [0, 421]"
        );

        let err = ApproxError::invalid_configuration("n_max must be positive");
        assert!(err.to_string().contains("n_max must be positive"));
    }

    #[test]
    fn test_from_math_error() {
        let err: ApproxError = MathError::invalid_input("bad tolerance").into();
        assert!(matches!(err, ApproxError::Quadrature(_)));
        assert!(!err.is_recoverable());
        assert!(ApproxError::NotReady.is_recoverable());
    }
}
