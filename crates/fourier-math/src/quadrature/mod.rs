//! Adaptive numerical integration.
//!
//! This module provides globally adaptive quadrature routines:
//!
//! - [`gauss_kronrod`]: 7/15-point Gauss-Kronrod for general integrands
//! - [`oscillatory`]: Filon-type rule for `f(x) cos(ωx)` and `f(x) sin(ωx)`
//!
//! # Choosing a Routine
//!
//! | Routine | Integrand | Panel Rule | Error Estimate |
//! |---------|-----------|------------|----------------|
//! | Gauss-Kronrod | Smooth `f(x)` | 15 nodes | Kronrod vs Gauss |
//! | Oscillatory | `f(x) w(x)` with trig weight | 5 nodes + exact moments | Quartic vs quadratic |
//!
//! Sampling a high-frequency product naively needs a node count proportional
//! to the frequency. The oscillatory routine integrates the weight exactly and
//! only asks `f` to be locally polynomial, so its cost does not grow with `ω`.
//!
//! # Breakpoints
//!
//! Both routines accept interior breakpoints. A kink of `f` between two nodes
//! is invisible to a polynomial model; passing it as a breakpoint makes every
//! panel smooth.
//!
//! # Example
//!
//! ```rust
//! use fourier_math::quadrature::{oscillatory, OscillatoryWeight, QuadratureConfig};
//!
//! // ∫_0^1 x² cos(40x) dx, a quadratic integrated exactly by the Filon rule
//! let result = oscillatory(
//!     |x: f64| x * x,
//!     0.0,
//!     1.0,
//!     OscillatoryWeight::Cos(40.0),
//!     &[],
//!     &QuadratureConfig::default(),
//! )
//! .unwrap();
//!
//! let w: f64 = 40.0;
//! let exact = w.sin() / w + 2.0 * w.cos() / (w * w) - 2.0 * w.sin() / (w * w * w);
//! assert!((result.value - exact).abs() < 1e-12);
//! assert!(result.converged);
//! ```

mod adaptive;
mod gauss_kronrod;
mod oscillatory;

pub use gauss_kronrod::gauss_kronrod;
pub use oscillatory::{oscillatory, OscillatoryWeight};

use crate::error::{MathError, MathResult};

/// Default absolute tolerance for adaptive quadrature.
pub const DEFAULT_ABS_TOLERANCE: f64 = 1.49e-8;

/// Default relative tolerance for adaptive quadrature.
pub const DEFAULT_REL_TOLERANCE: f64 = 1.49e-8;

/// Default upper bound on the number of panels.
pub const DEFAULT_MAX_SUBINTERVALS: usize = 50;

/// Configuration for adaptive quadrature.
///
/// An integral is accepted once its total error estimate drops below
/// `max(abs_tolerance, rel_tolerance * |value|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureConfig {
    /// Absolute error tolerance.
    pub abs_tolerance: f64,
    /// Relative error tolerance.
    pub rel_tolerance: f64,
    /// Maximum number of panels held by the adaptive driver.
    pub max_subintervals: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            max_subintervals: DEFAULT_MAX_SUBINTERVALS,
        }
    }
}

impl QuadratureConfig {
    /// Creates a new quadrature configuration.
    #[must_use]
    pub fn new(abs_tolerance: f64, rel_tolerance: f64, max_subintervals: usize) -> Self {
        Self {
            abs_tolerance,
            rel_tolerance,
            max_subintervals,
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_abs_tolerance(mut self, abs_tolerance: f64) -> Self {
        self.abs_tolerance = abs_tolerance;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_rel_tolerance(mut self, rel_tolerance: f64) -> Self {
        self.rel_tolerance = rel_tolerance;
        self
    }

    /// Sets the maximum number of panels.
    #[must_use]
    pub fn with_max_subintervals(mut self, max_subintervals: usize) -> Self {
        self.max_subintervals = max_subintervals;
        self
    }

    /// Checks that tolerances are non-negative and at least one panel is allowed.
    pub fn validate(&self) -> MathResult<()> {
        let invalid = |tol: f64| tol.is_nan() || tol < 0.0;
        if invalid(self.abs_tolerance) || invalid(self.rel_tolerance) {
            return Err(MathError::invalid_input(format!(
                "tolerances must be non-negative: abs={}, rel={}",
                self.abs_tolerance, self.rel_tolerance
            )));
        }
        if self.max_subintervals == 0 {
            return Err(MathError::invalid_input(
                "max_subintervals must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the error budget for an integral of the given magnitude.
    pub(crate) fn tolerance_for(&self, value: f64) -> f64 {
        self.abs_tolerance.max(self.rel_tolerance * value.abs())
    }
}

/// Result of an adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Estimated value of the integral.
    pub value: f64,
    /// Estimated absolute error.
    pub abs_error: f64,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// Number of panels in the final subdivision.
    pub subintervals: usize,
    /// Whether the error estimate met the requested tolerance.
    pub converged: bool,
}

impl QuadratureResult {
    /// Result for an empty interval.
    pub(crate) fn zero() -> Self {
        Self {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            subintervals: 0,
            converged: true,
        }
    }

    /// Multiplies the value by `factor` and the error by its magnitude.
    pub(crate) fn scaled(mut self, factor: f64) -> Self {
        self.value *= factor;
        self.abs_error *= factor.abs();
        self
    }
}

/// Trait for definite-integral routines.
///
/// Gives callers a single seam over the available quadrature rules.
///
/// # Example
///
/// ```rust
/// use fourier_math::quadrature::{GaussKronrodIntegrator, Integrator, QuadratureConfig};
///
/// let integrator = GaussKronrodIntegrator;
/// let result = integrator
///     .integrate(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &[], &QuadratureConfig::default())
///     .unwrap();
/// assert!((result.value - 2.0).abs() < 1e-12);
/// ```
pub trait Integrator {
    /// Integrates `f` over `[a, b]`.
    ///
    /// # Arguments
    ///
    /// * `f` - The integrand
    /// * `a` - Lower bound
    /// * `b` - Upper bound
    /// * `breakpoints` - Interior points where `f` is not smooth
    /// * `config` - Quadrature configuration
    fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        breakpoints: &[f64],
        config: &QuadratureConfig,
    ) -> MathResult<QuadratureResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the routine.
    fn name(&self) -> &'static str;
}

/// Adaptive Gauss-Kronrod integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussKronrodIntegrator;

impl Integrator for GaussKronrodIntegrator {
    fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        breakpoints: &[f64],
        config: &QuadratureConfig,
    ) -> MathResult<QuadratureResult>
    where
        F: Fn(f64) -> f64,
    {
        gauss_kronrod(f, a, b, breakpoints, config)
    }

    fn name(&self) -> &'static str {
        "Gauss-Kronrod (7/15)"
    }
}

/// Adaptive integrator for a fixed trigonometric weight.
#[derive(Debug, Clone, Copy)]
pub struct OscillatoryIntegrator {
    /// Weight multiplying the integrand.
    pub weight: OscillatoryWeight,
}

impl OscillatoryIntegrator {
    /// Creates an integrator for the given weight.
    #[must_use]
    pub fn new(weight: OscillatoryWeight) -> Self {
        Self { weight }
    }
}

impl Integrator for OscillatoryIntegrator {
    fn integrate<F>(
        &self,
        f: F,
        a: f64,
        b: f64,
        breakpoints: &[f64],
        config: &QuadratureConfig,
    ) -> MathResult<QuadratureResult>
    where
        F: Fn(f64) -> f64,
    {
        oscillatory(f, a, b, self.weight, breakpoints, config)
    }

    fn name(&self) -> &'static str {
        match self.weight {
            OscillatoryWeight::Cos(_) => "Filon (cosine weight)",
            OscillatoryWeight::Sin(_) => "Filon (sine weight)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadrature_config() {
        let config = QuadratureConfig::default()
            .with_abs_tolerance(1e-12)
            .with_rel_tolerance(1e-10)
            .with_max_subintervals(200);

        assert!((config.abs_tolerance - 1e-12).abs() < f64::EPSILON);
        assert!((config.rel_tolerance - 1e-10).abs() < f64::EPSILON);
        assert_eq!(config.max_subintervals, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(QuadratureConfig::default()
            .with_abs_tolerance(-1.0)
            .validate()
            .is_err());
        assert!(QuadratureConfig::default()
            .with_rel_tolerance(f64::NAN)
            .validate()
            .is_err());
        assert!(QuadratureConfig::default()
            .with_max_subintervals(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_tolerance_for() {
        let config = QuadratureConfig::new(1e-8, 1e-6, 50);
        assert_relative_eq!(config.tolerance_for(1.0), 1e-6);
        assert_relative_eq!(config.tolerance_for(-1e-4), 1e-8);
    }

    #[test]
    fn test_integrator_trait_gauss_kronrod() {
        let integrator = GaussKronrodIntegrator;
        let result = integrator
            .integrate(|x: f64| x.exp(), 0.0, 1.0, &[], &QuadratureConfig::default())
            .unwrap();

        assert_relative_eq!(result.value, std::f64::consts::E - 1.0, epsilon = 1e-12);
        assert_eq!(integrator.name(), "Gauss-Kronrod (7/15)");
    }

    #[test]
    fn test_integrator_trait_oscillatory() {
        let integrator = OscillatoryIntegrator::new(OscillatoryWeight::Sin(30.0));
        let result = integrator
            .integrate(|_| 1.0, 0.0, 1.0, &[], &QuadratureConfig::default())
            .unwrap();

        let exact = (1.0 - 30.0_f64.cos()) / 30.0;
        assert_relative_eq!(result.value, exact, epsilon = 1e-12);
        assert_eq!(integrator.name(), "Filon (sine weight)");
    }
}
