//! Approximator configuration.
//!
//! The configuration surface is `{x_low, x_high, n_max, strike_price}` plus
//! the quadrature tolerances. It can be built in code or read from TOML:
//!
//! ```toml
//! x_low = 0.0
//! x_high = 421.0
//! n_max = 100
//! strike_price = 100.0
//!
//! [quadrature]
//! abs_tolerance = 1.0e-10
//! ```

use std::f64::consts::PI;

use fourier_math::quadrature::{
    QuadratureConfig, DEFAULT_ABS_TOLERANCE, DEFAULT_MAX_SUBINTERVALS, DEFAULT_REL_TOLERANCE,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApproxError, ApproxResult};

/// Strike used when none is given.
pub const DEFAULT_STRIKE_PRICE: f64 = 100.0;

fn default_strike_price() -> f64 {
    DEFAULT_STRIKE_PRICE
}

/// Tolerances for the coefficient integrals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureSettings {
    /// Absolute error tolerance per integral.
    pub abs_tolerance: f64,
    /// Relative error tolerance per integral.
    pub rel_tolerance: f64,
    /// Maximum number of panels per integral.
    pub max_subintervals: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            max_subintervals: DEFAULT_MAX_SUBINTERVALS,
        }
    }
}

impl From<QuadratureSettings> for QuadratureConfig {
    fn from(settings: QuadratureSettings) -> Self {
        QuadratureConfig::new(
            settings.abs_tolerance,
            settings.rel_tolerance,
            settings.max_subintervals,
        )
    }
}

/// Configuration of a [`FourierApproximator`](crate::FourierApproximator).
///
/// # Example
///
/// ```rust
/// use fourier_core::ApproximatorConfig;
///
/// let config = ApproximatorConfig::new(0.0, 421.0, 10).with_strike_price(120.0);
/// assert!(config.validate().is_ok());
/// assert!((config.period() - 421.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproximatorConfig {
    /// Lower bound of one period.
    pub x_low: f64,
    /// Upper bound of one period.
    pub x_high: f64,
    /// Number of harmonics kept in the series.
    pub n_max: usize,
    /// Kink location of the call payoff.
    #[serde(default = "default_strike_price")]
    pub strike_price: f64,
    /// Quadrature tolerances.
    #[serde(default)]
    pub quadrature: QuadratureSettings,
}

impl ApproximatorConfig {
    /// Creates a configuration with the default strike and tolerances.
    #[must_use]
    pub fn new(x_low: f64, x_high: f64, n_max: usize) -> Self {
        Self {
            x_low,
            x_high,
            n_max,
            strike_price: DEFAULT_STRIKE_PRICE,
            quadrature: QuadratureSettings::default(),
        }
    }

    /// Sets the strike price.
    #[must_use]
    pub fn with_strike_price(mut self, strike_price: f64) -> Self {
        self.strike_price = strike_price;
        self
    }

    /// Sets the number of harmonics.
    #[must_use]
    pub fn with_n_max(mut self, n_max: usize) -> Self {
        self.n_max = n_max;
        self
    }

    /// Sets the quadrature tolerances.
    #[must_use]
    pub fn with_quadrature(mut self, quadrature: QuadratureSettings) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Length of one period.
    pub fn period(&self) -> f64 {
        self.x_high - self.x_low
    }

    /// Base angular frequency `2π / period`.
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / self.period()
    }

    /// Checks the construction contract.
    ///
    /// # Errors
    ///
    /// Returns [`ApproxError::InvalidConfiguration`] unless all values and the
    /// period are finite, `strike_price > 0`, `n_max > 0` and
    /// `x_low < strike_price < x_high`, or if the quadrature tolerances are
    /// rejected.
    pub fn validate(&self) -> ApproxResult<()> {
        if !self.x_low.is_finite() || !self.x_high.is_finite() || !self.strike_price.is_finite() {
            return Err(ApproxError::invalid_configuration(format!(
                "bounds and strike must be finite: x_low={}, x_high={}, strike_price={}",
                self.x_low, self.x_high, self.strike_price
            )));
        }
        if !self.period().is_finite() {
            return Err(ApproxError::invalid_configuration(format!(
                "period x_high - x_low overflows: x_low={}, x_high={}",
                self.x_low, self.x_high
            )));
        }
        if self.strike_price <= 0.0 {
            return Err(ApproxError::invalid_configuration(format!(
                "strike_price must be positive, got {}",
                self.strike_price
            )));
        }
        if self.n_max == 0 {
            return Err(ApproxError::invalid_configuration(
                "n_max must be a positive number of harmonics",
            ));
        }
        if self.x_low >= self.strike_price {
            return Err(ApproxError::invalid_configuration(format!(
                "x_low ({}) must lie below strike_price ({})",
                self.x_low, self.strike_price
            )));
        }
        if self.x_high <= self.strike_price {
            return Err(ApproxError::invalid_configuration(format!(
                "x_high ({}) must lie above strike_price ({})",
                self.x_high, self.strike_price
            )));
        }
        QuadratureConfig::from(self.quadrature)
            .validate()
            .map_err(|e| ApproxError::invalid_configuration(e.to_string()))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> ApproxResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ApproxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ApproxResult<String> {
        toml::to_string(self).map_err(|e| ApproxError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_quantities() {
        let config = ApproximatorConfig::new(-10.0, 30.0, 5);
        assert_relative_eq!(config.period(), 40.0);
        assert_relative_eq!(config.angular_frequency(), PI / 20.0);
        assert_relative_eq!(config.strike_price, DEFAULT_STRIKE_PRICE);
    }

    #[test]
    fn test_contract_violations() {
        let base = ApproximatorConfig::new(0.0, 421.0, 10);
        assert!(base.validate().is_ok());

        let cases = [
            base.with_strike_price(0.0),
            base.with_strike_price(-5.0),
            base.with_n_max(0),
            base.with_strike_price(f64::NAN),
            base.with_strike_price(421.0),
            base.with_strike_price(500.0),
            ApproximatorConfig::new(100.0, 421.0, 10),
            ApproximatorConfig::new(f64::NAN, 421.0, 10),
            ApproximatorConfig::new(0.0, f64::INFINITY, 10),
            ApproximatorConfig::new(-1e308, 1e308, 1),
        ];
        for config in cases {
            assert!(
                matches!(
                    config.validate(),
                    Err(ApproxError::InvalidConfiguration { .. })
                ),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_tolerance_rejected() {
        let settings = QuadratureSettings {
            abs_tolerance: -1.0,
            ..QuadratureSettings::default()
        };
        let config = ApproximatorConfig::new(0.0, 421.0, 10).with_quadrature(settings);
        assert!(matches!(
            config.validate(),
            Err(ApproxError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_toml_defaults() {
        let config = ApproximatorConfig::from_toml_str(
            r#"
            x_low = 0.0
            x_high = 421.0
            n_max = 100

            [quadrature]
            abs_tolerance = 1.0e-10
            "#,
        )
        .unwrap();

        assert_eq!(config.n_max, 100);
        assert_relative_eq!(config.strike_price, DEFAULT_STRIKE_PRICE);
        assert_relative_eq!(config.quadrature.abs_tolerance, 1e-10);
        assert_relative_eq!(config.quadrature.rel_tolerance, DEFAULT_REL_TOLERANCE);
        assert_eq!(config.quadrature.max_subintervals, DEFAULT_MAX_SUBINTERVALS);
    }

    #[test]
    fn test_toml_errors() {
        assert!(matches!(
            ApproximatorConfig::from_toml_str("x_low = 0.0"),
            Err(ApproxError::Config(_))
        ));
        assert!(matches!(
            ApproximatorConfig::from_toml_str("x_low = 0.0\nx_high = 50.0\nn_max = 3"),
            Err(ApproxError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ApproximatorConfig::new(0.0, 421.0, 7).with_strike_price(150.0);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ApproximatorConfig::from_toml_str(&text).unwrap(), config);
    }
}
