//! The Fourier approximation engine.

use fourier_math::quadrature::{gauss_kronrod, oscillatory, OscillatoryWeight, QuadratureConfig};
use ndarray::{Array1, ArrayView1};

use crate::coefficients::CoefficientSet;
use crate::config::{ApproximatorConfig, DEFAULT_STRIKE_PRICE};
use crate::error::{ApproxError, ApproxResult};
use crate::payoff::CallPayoff;

/// Truncated Fourier series of the periodic call payoff.
///
/// The lifecycle is: construct with a validated configuration, call
/// [`compute_coefficients`](Self::compute_coefficients) once, then evaluate
/// [`series`](Self::series) as often as needed. Recomputing overwrites the
/// previous coefficients.
///
/// # Example
///
/// ```rust
/// use fourier_core::FourierApproximator;
///
/// let mut approx = FourierApproximator::new(0.0, 421.0, 200, 100.0).unwrap();
/// approx.compute_coefficients().unwrap();
///
/// let exact = approx.periodic_payoff(300.0).unwrap();
/// let series = approx.series(300.0).unwrap();
/// assert!((exact - series).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FourierApproximator {
    config: ApproximatorConfig,
    payoff: CallPayoff,
    period: f64,
    angular_frequency: f64,
    quadrature: QuadratureConfig,
    coefficients: Option<CoefficientSet>,
}

impl FourierApproximator {
    /// Creates an approximator with default quadrature tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`ApproxError::InvalidConfiguration`] if `strike_price <= 0`,
    /// `n_max == 0`, `x_low >= strike_price` or `x_high <= strike_price`.
    pub fn new(x_low: f64, x_high: f64, n_max: usize, strike_price: f64) -> ApproxResult<Self> {
        Self::from_config(
            ApproximatorConfig::new(x_low, x_high, n_max).with_strike_price(strike_price),
        )
    }

    /// Creates an approximator struck at [`DEFAULT_STRIKE_PRICE`].
    ///
    /// # Errors
    ///
    /// Returns [`ApproxError::InvalidConfiguration`] under the same conditions
    /// as [`new`](Self::new).
    pub fn with_default_strike(x_low: f64, x_high: f64, n_max: usize) -> ApproxResult<Self> {
        Self::new(x_low, x_high, n_max, DEFAULT_STRIKE_PRICE)
    }

    /// Creates an approximator from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApproxError::InvalidConfiguration`] if
    /// [`ApproximatorConfig::validate`] rejects `config`.
    pub fn from_config(config: ApproximatorConfig) -> ApproxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            payoff: CallPayoff::new(config.x_low, config.x_high, config.strike_price),
            period: config.period(),
            angular_frequency: config.angular_frequency(),
            quadrature: config.quadrature.into(),
            coefficients: None,
        })
    }

    /// The configuration this approximator was built from.
    pub fn config(&self) -> &ApproximatorConfig {
        &self.config
    }

    /// Lower bound of the period.
    pub fn x_low(&self) -> f64 {
        self.config.x_low
    }

    /// Upper bound of the period.
    pub fn x_high(&self) -> f64 {
        self.config.x_high
    }

    /// Number of harmonics.
    pub fn n_max(&self) -> usize {
        self.config.n_max
    }

    /// Kink location of the payoff.
    pub fn strike_price(&self) -> f64 {
        self.config.strike_price
    }

    /// Length of one period.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Base angular frequency `2π / period`.
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// The underlying payoff.
    pub fn call_payoff(&self) -> &CallPayoff {
        &self.payoff
    }

    /// Coefficients, once computed.
    pub fn coefficients(&self) -> Option<&CoefficientSet> {
        self.coefficients.as_ref()
    }

    /// Returns true once coefficients are available.
    pub fn is_ready(&self) -> bool {
        self.coefficients.is_some()
    }

    // ---- Base payoff ----------------------------------------------------

    /// Evaluates `max(0, x - strike)` on `[x_low, x_high]`, with `x_high`
    /// identified with `x_low`.
    pub fn payoff(&self, x: f64) -> ApproxResult<f64> {
        self.payoff.evaluate(x)
    }

    /// Elementwise [`payoff`](Self::payoff). The input is only borrowed; the
    /// boundary fold is applied to the returned values, never to `x`.
    ///
    /// # Errors
    ///
    /// Fails on the first element outside the domain.
    pub fn payoff_batch(&self, x: ArrayView1<'_, f64>) -> ApproxResult<Array1<f64>> {
        Self::map_elements(x, |v| self.payoff.evaluate(v))
    }

    // ---- Periodic extension ---------------------------------------------

    /// Evaluates the payoff's periodic extension at any real `x`.
    pub fn periodic_payoff(&self, x: f64) -> ApproxResult<f64> {
        self.payoff.evaluate_periodic(x)
    }

    /// Elementwise [`periodic_payoff`](Self::periodic_payoff).
    pub fn periodic_payoff_batch(&self, x: ArrayView1<'_, f64>) -> ApproxResult<Array1<f64>> {
        Self::map_elements(x, |v| self.payoff.evaluate_periodic(v))
    }

    // ---- Coefficients -----------------------------------------------------

    /// Computes `c0`, `a[n]` and `b[n]` for `n = 1..=n_max`.
    ///
    /// `c0` comes from adaptive Gauss-Kronrod; every harmonic integral uses
    /// the oscillatory Filon rule. The strike is passed as a breakpoint to
    /// both, so each panel sees a linear integrand. Integrals that miss their
    /// tolerance are counted in [`CoefficientSet::unconverged`] and logged.
    ///
    /// # Errors
    ///
    /// Only if the quadrature layer rejects the request, which a validated
    /// configuration rules out.
    pub fn compute_coefficients(&mut self) -> ApproxResult<&CoefficientSet> {
        let payoff = self.payoff;
        let integrand = move |x: f64| payoff.intrinsic(x);
        let (lo, hi) = (self.x_low(), self.x_high());
        let breakpoints = [self.strike_price()];
        let n_max = self.n_max();

        log::debug!(
            "computing {} Fourier integrals on [{lo}, {hi}], strike {}",
            2 * n_max + 1,
            payoff.strike_price()
        );

        let mean = gauss_kronrod(integrand, lo, hi, &breakpoints, &self.quadrature)?;
        let mut set = CoefficientSet::with_mean(
            mean.value / self.period,
            mean.abs_error / self.period,
            n_max,
        );
        if !mean.converged {
            set.record_unconverged();
        }

        let scale = 2.0 / self.period;
        for n in 1..=n_max {
            let frequency = n as f64 * self.angular_frequency;
            let cos = oscillatory(
                integrand,
                lo,
                hi,
                OscillatoryWeight::Cos(frequency),
                &breakpoints,
                &self.quadrature,
            )?;
            let sin = oscillatory(
                integrand,
                lo,
                hi,
                OscillatoryWeight::Sin(frequency),
                &breakpoints,
                &self.quadrature,
            )?;

            for result in [&cos, &sin] {
                if !result.converged {
                    set.record_unconverged();
                    log::warn!(
                        "harmonic {n} missed tolerance: error {:.2e}",
                        result.abs_error
                    );
                }
            }

            set.push(
                scale * cos.value,
                scale * cos.abs_error,
                scale * sin.value,
                scale * sin.abs_error,
            );
        }

        if set.unconverged() > 0 {
            log::warn!(
                "{} of {} Fourier integrals missed tolerance; largest coefficient error {:.2e}",
                set.unconverged(),
                2 * n_max + 1,
                set.max_error_estimate()
            );
        }
        log::debug!(
            "Fourier coefficients ready: c0 = {:.6}, max error estimate {:.2e}",
            set.c0(),
            set.max_error_estimate()
        );

        Ok(self.coefficients.insert(set))
    }

    // ---- Series -------------------------------------------------------------

    /// Evaluates the truncated series at `x`. No periodic folding is applied.
    ///
    /// # Errors
    ///
    /// - [`ApproxError::NotReady`] before [`compute_coefficients`](Self::compute_coefficients)
    /// - [`ApproxError::UnsupportedInputType`] for NaN or infinite `x`
    pub fn series(&self, x: f64) -> ApproxResult<f64> {
        let coefficients = self.ready_coefficients()?;
        if !x.is_finite() {
            return Err(ApproxError::UnsupportedInputType { value: x });
        }
        Ok(coefficients.evaluate(self.angular_frequency, x))
    }

    /// Elementwise [`series`](Self::series).
    pub fn series_batch(&self, x: ArrayView1<'_, f64>) -> ApproxResult<Array1<f64>> {
        let coefficients = self.ready_coefficients()?;
        Self::map_elements(x, |v| {
            if v.is_finite() {
                Ok(coefficients.evaluate(self.angular_frequency, v))
            } else {
                Err(ApproxError::UnsupportedInputType { value: v })
            }
        })
    }

    fn ready_coefficients(&self) -> ApproxResult<&CoefficientSet> {
        self.coefficients.as_ref().ok_or(ApproxError::NotReady)
    }

    /// Shared elementwise kernel of the batch operations.
    fn map_elements<F>(x: ArrayView1<'_, f64>, f: F) -> ApproxResult<Array1<f64>>
    where
        F: Fn(f64) -> ApproxResult<f64>,
    {
        x.iter()
            .map(|&v| f(v))
            .collect::<ApproxResult<Vec<f64>>>()
            .map(Array1::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuadratureSettings;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn approximator(n_max: usize) -> FourierApproximator {
        FourierApproximator::new(0.0, 421.0, n_max, 100.0).unwrap()
    }

    #[test]
    fn test_construction() {
        let approx = approximator(10);
        assert_relative_eq!(approx.period(), 421.0);
        assert_relative_eq!(
            approx.angular_frequency(),
            2.0 * std::f64::consts::PI / 421.0
        );
        assert!(!approx.is_ready());

        let default = FourierApproximator::with_default_strike(0.0, 421.0, 3).unwrap();
        assert_relative_eq!(default.strike_price(), 100.0);

        let payoff = approx.call_payoff();
        assert_relative_eq!(payoff.period(), approx.period());
        assert_relative_eq!(payoff.strike_price(), 100.0);
    }

    #[test]
    fn test_invalid_construction() {
        for (lo, hi, n, k) in [
            (0.0, 421.0, 10, 0.0),
            (0.0, 421.0, 0, 100.0),
            (100.0, 421.0, 10, 100.0),
            (150.0, 421.0, 10, 100.0),
            (0.0, 100.0, 10, 100.0),
            (0.0, 90.0, 10, 100.0),
            (-1e308, 1e308, 1, 100.0),
        ] {
            assert!(matches!(
                FourierApproximator::new(lo, hi, n, k),
                Err(ApproxError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_batch_does_not_touch_input() {
        let approx = approximator(1);
        let x = array![0.0, 50.0, 150.0, 421.0];
        let y = approx.payoff_batch(x.view()).unwrap();

        assert_eq!(x, array![0.0, 50.0, 150.0, 421.0]);
        assert_eq!(y, array![0.0, 0.0, 50.0, 0.0]);
    }

    #[test]
    fn test_batch_domain_error() {
        let approx = approximator(1);
        let x = array![0.0, 500.0];
        assert_eq!(
            approx.payoff_batch(x.view()),
            Err(ApproxError::out_of_domain(500.0, 0.0, 421.0))
        );
    }

    #[test]
    fn test_periodic_batch_matches_scalar() {
        let approx = approximator(1);
        let x = array![-100.0, -0.5, 0.0, 210.0, 421.0, 700.0, 1000.0];
        let batch = approx.periodic_payoff_batch(x.view()).unwrap();
        for (xi, yi) in x.iter().zip(batch.iter()) {
            assert_eq!(*yi, approx.periodic_payoff(*xi).unwrap());
        }
    }

    #[test]
    fn test_series_requires_coefficients() {
        let approx = approximator(5);
        assert_eq!(approx.series(1.0), Err(ApproxError::NotReady));
        assert_eq!(
            approx.series_batch(array![1.0, 2.0].view()),
            Err(ApproxError::NotReady)
        );
    }

    #[test]
    fn test_coefficients_match_closed_form() {
        let mut approx = approximator(25);
        let set = approx.compute_coefficients().unwrap().clone();

        let (period, strike) = (421.0_f64, 100.0_f64);
        assert_relative_eq!(set.c0(), 321.0_f64.powi(2) / 2.0 / 421.0, epsilon = 1e-10);

        for h in set.harmonics() {
            let k = h.n as f64 * approx.angular_frequency();
            let a = 2.0 / period * (1.0 - (k * strike).cos()) / (k * k);
            let b = 2.0 / period * (-(period - strike) / k - (k * strike).sin() / (k * k));
            assert_relative_eq!(h.a, a, epsilon = 1e-10);
            assert_relative_eq!(h.b, b, epsilon = 1e-10);
        }
        assert_eq!(set.unconverged(), 0);
    }

    #[test]
    fn test_missed_tolerance_keeps_estimates() {
        let settings = QuadratureSettings {
            abs_tolerance: 0.0,
            rel_tolerance: 0.0,
            max_subintervals: 2,
        };
        let config = ApproximatorConfig::new(0.0, 421.0, 5).with_quadrature(settings);
        let mut approx = FourierApproximator::from_config(config).unwrap();
        let set = approx.compute_coefficients().unwrap().clone();

        assert_eq!(set.unconverged(), 2 * 5 + 1);
        assert!(set.max_error_estimate() > 0.0);
        assert_relative_eq!(set.c0(), 321.0_f64.powi(2) / 2.0 / 421.0, epsilon = 1e-6);

        let (period, strike) = (421.0_f64, 100.0_f64);
        for h in set.harmonics() {
            let k = h.n as f64 * approx.angular_frequency();
            let a = 2.0 / period * (1.0 - (k * strike).cos()) / (k * k);
            let b = 2.0 / period * (-(period - strike) / k - (k * strike).sin() / (k * k));
            assert_relative_eq!(h.a, a, epsilon = 1e-6);
            assert_relative_eq!(h.b, b, epsilon = 1e-6);
        }
        assert!(approx.series(250.0).is_ok());
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let mut approx = approximator(40);
        let first = approx.compute_coefficients().unwrap().clone();
        let second = approx.compute_coefficients().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_series_scalar_and_batch_agree() {
        let mut approx = approximator(50);
        approx.compute_coefficients().unwrap();

        let x = array![-250.0, 0.0, 99.0, 333.3, 1200.0];
        let batch = approx.series_batch(x.view()).unwrap();
        assert_eq!(batch.len(), x.len());
        for (xi, yi) in x.iter().zip(batch.iter()) {
            assert_eq!(*yi, approx.series(*xi).unwrap());
        }

        assert!(matches!(
            approx.series(f64::NAN),
            Err(ApproxError::UnsupportedInputType { .. })
        ));
    }

    #[test]
    fn test_series_is_periodic_by_construction() {
        let mut approx = approximator(30);
        approx.compute_coefficients().unwrap();

        let x = 250.0;
        assert_relative_eq!(
            approx.series(x).unwrap(),
            approx.series(x + 421.0).unwrap(),
            epsilon = 1e-9
        );
    }
}
