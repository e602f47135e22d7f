//! The call payoff on one period and its periodic extension.

use crate::error::{ApproxError, ApproxResult};

/// Call payoff `max(0, x - strike)` restricted to `[x_low, x_high]`.
///
/// The two ends of the period are identified: `x_high` evaluates as `x_low`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallPayoff {
    x_low: f64,
    x_high: f64,
    strike_price: f64,
}

impl CallPayoff {
    /// Creates the payoff for one period. Bounds are assumed validated.
    pub(crate) fn new(x_low: f64, x_high: f64, strike_price: f64) -> Self {
        Self {
            x_low,
            x_high,
            strike_price,
        }
    }

    /// Length of one period.
    pub fn period(&self) -> f64 {
        self.x_high - self.x_low
    }

    /// Kink location.
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// `max(0, x - strike)` with no domain handling.
    ///
    /// This is the integrand of the coefficient integrals. It differs from
    /// [`evaluate`](Self::evaluate) only at `x_high`, a set of measure zero,
    /// and keeps the last panel linear up to its endpoint.
    #[inline]
    pub fn intrinsic(&self, x: f64) -> f64 {
        (x - self.strike_price).max(0.0)
    }

    /// Evaluates the payoff on its period.
    ///
    /// # Errors
    ///
    /// - [`ApproxError::UnsupportedInputType`] for NaN or infinite `x`
    /// - [`ApproxError::OutOfDomain`] for `x` outside `[x_low, x_high]`
    pub fn evaluate(&self, x: f64) -> ApproxResult<f64> {
        if !x.is_finite() {
            return Err(ApproxError::UnsupportedInputType { value: x });
        }
        if x < self.x_low || x > self.x_high {
            return Err(ApproxError::out_of_domain(x, self.x_low, self.x_high));
        }
        let x = if x == self.x_high { self.x_low } else { x };
        Ok(self.intrinsic(x))
    }

    /// Maps any real `x` onto `[x_low, x_high]` by a floor-mod shift.
    ///
    /// The Euclidean remainder keeps points left of `x_low` on the correct
    /// side. Rounding can land exactly on `x_high`, which `evaluate` folds.
    pub fn wrap(&self, x: f64) -> f64 {
        ((x - self.x_low).rem_euclid(self.period()) + self.x_low).min(self.x_high)
    }

    /// Evaluates the periodic extension at any real `x`.
    pub fn evaluate_periodic(&self, x: f64) -> ApproxResult<f64> {
        if !x.is_finite() {
            return Err(ApproxError::UnsupportedInputType { value: x });
        }
        self.evaluate(self.wrap(x))
    }
}
