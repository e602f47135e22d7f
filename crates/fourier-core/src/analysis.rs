//! Accuracy analysis of the truncated series.
//!
//! Compares the series against the periodic payoff on an evaluation grid and
//! sweeps the number of harmonics to show convergence.

use ndarray::{Array1, ArrayView1};
use serde::Serialize;

use crate::approximator::FourierApproximator;
use crate::config::ApproximatorConfig;
use crate::error::{ApproxError, ApproxResult};

/// Harmonic counts swept by default.
pub const DEFAULT_ORDERS: [usize; 5] = [1, 10, 100, 1000, 10000];

/// `num` evenly spaced points from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, num: usize) -> Array1<f64> {
    Array1::linspace(start, end, num)
}

/// Maximum deviation between series and periodic payoff on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApproximationError {
    /// Largest `|reference - series|` on the grid.
    pub max_abs_error: f64,
    /// `max_abs_error / x_high`.
    pub relative_error: f64,
    /// Grid point where the largest error occurs.
    pub worst_x: f64,
}

impl ApproximationError {
    /// Measures the error of a computed approximator on `grid`.
    ///
    /// # Errors
    ///
    /// - [`ApproxError::EmptyGrid`] if `grid` has no points
    /// - [`ApproxError::NotReady`] before coefficients are computed
    /// - [`ApproxError::UnsupportedInputType`] for non-finite grid points
    pub fn measure(approx: &FourierApproximator, grid: ArrayView1<'_, f64>) -> ApproxResult<Self> {
        if grid.is_empty() {
            return Err(ApproxError::EmptyGrid);
        }
        let series = approx.series_batch(grid)?;
        let reference = approx.periodic_payoff_batch(grid)?;

        let (worst_x, max_abs_error) = grid
            .iter()
            .zip(reference.iter().zip(series.iter()))
            .map(|(&x, (r, s))| (x, (r - s).abs()))
            .fold((grid[0], 0.0_f64), |best, (x, err)| {
                if err > best.1 {
                    (x, err)
                } else {
                    best
                }
            });

        Ok(Self {
            max_abs_error,
            relative_error: max_abs_error / approx.x_high(),
            worst_x,
        })
    }
}

/// One line of a convergence study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceRow {
    /// Number of harmonics.
    pub n_max: usize,
    /// Maximum absolute error relative to `x_high`.
    pub relative_error: f64,
    /// Maximum absolute error on the grid.
    pub max_abs_error: f64,
    /// Mean coefficient.
    pub c0: f64,
    /// Largest quadrature error estimate over all coefficients.
    pub max_quadrature_error: f64,
    /// Integrals that missed their tolerance.
    pub unconverged_integrals: usize,
}

/// Sweep of the series error over several harmonic counts.
///
/// # Example
///
/// ```rust
/// use fourier_core::analysis::{linspace, ConvergenceStudy};
/// use fourier_core::ApproximatorConfig;
///
/// let study = ConvergenceStudy::new(ApproximatorConfig::new(0.0, 421.0, 1), vec![1, 10]);
/// let rows = study.run(linspace(-100.0, 1000.0, 200).view()).unwrap();
/// assert!(rows[1].max_abs_error <= rows[0].max_abs_error);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceStudy {
    /// Bounds, strike and tolerances shared by every run. `n_max` is ignored.
    pub config: ApproximatorConfig,
    /// Harmonic counts, in the order they are run.
    pub orders: Vec<usize>,
}

impl Default for ConvergenceStudy {
    fn default() -> Self {
        Self::new(ApproximatorConfig::new(0.0, 421.0, 1), DEFAULT_ORDERS.to_vec())
    }
}

impl ConvergenceStudy {
    /// Creates a study over `orders`.
    pub fn new(config: ApproximatorConfig, orders: Vec<usize>) -> Self {
        Self { config, orders }
    }

    /// Computes coefficients for each order and measures the error on `grid`.
    ///
    /// # Errors
    ///
    /// Stops at the first order that fails to construct or evaluate, for
    /// example `n_max == 0`.
    pub fn run(&self, grid: ArrayView1<'_, f64>) -> ApproxResult<Vec<ConvergenceRow>> {
        self.orders
            .iter()
            .map(|&n_max| {
                let mut approx = FourierApproximator::from_config(self.config.with_n_max(n_max))?;
                let (c0, max_quadrature_error, unconverged_integrals) = {
                    let set = approx.compute_coefficients()?;
                    (set.c0(), set.max_error_estimate(), set.unconverged())
                };
                let error = ApproximationError::measure(&approx, grid)?;
                log::debug!(
                    "n_max = {n_max}: relative error {:.3e} at x = {}",
                    error.relative_error,
                    error.worst_x
                );

                Ok(ConvergenceRow {
                    n_max,
                    relative_error: error.relative_error,
                    max_abs_error: error.max_abs_error,
                    c0,
                    max_quadrature_error,
                    unconverged_integrals,
                })
            })
            .collect()
    }
}

/// Reference and series value at one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSample {
    /// Grid point.
    pub x: f64,
    /// Periodic payoff at `x`.
    pub reference: f64,
    /// Truncated series at `x`.
    pub series: f64,
}

/// Samples reference and series on `grid`, one row per point.
pub fn sample_grid(
    approx: &FourierApproximator,
    grid: ArrayView1<'_, f64>,
) -> ApproxResult<Vec<SeriesSample>> {
    let series = approx.series_batch(grid)?;
    let reference = approx.periodic_payoff_batch(grid)?;
    Ok(grid
        .iter()
        .zip(reference.iter().zip(series.iter()))
        .map(|(&x, (&reference, &series))| SeriesSample {
            x,
            reference,
            series,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuadratureSettings;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn computed(n_max: usize) -> FourierApproximator {
        let mut approx = FourierApproximator::new(0.0, 421.0, n_max, 100.0).unwrap();
        approx.compute_coefficients().unwrap();
        approx
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(-100.0, 1000.0, 500);
        assert_eq!(grid.len(), 500);
        assert_relative_eq!(grid[0], -100.0);
        assert_relative_eq!(grid[499], 1000.0, epsilon = 1e-9);
        assert_relative_eq!(grid[1] - grid[0], 1100.0 / 499.0, epsilon = 1e-9);
    }

    #[test]
    fn test_measure_finds_worst_point() {
        let approx = computed(20);
        let grid = linspace(-100.0, 1000.0, 300);
        let error = ApproximationError::measure(&approx, grid.view()).unwrap();

        assert!(error.max_abs_error > 0.0);
        assert_relative_eq!(error.relative_error, error.max_abs_error / 421.0);

        let at_worst = (approx.periodic_payoff(error.worst_x).unwrap()
            - approx.series(error.worst_x).unwrap())
        .abs();
        assert_relative_eq!(at_worst, error.max_abs_error, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_errors() {
        let approx = FourierApproximator::new(0.0, 421.0, 5, 100.0).unwrap();
        assert_eq!(
            ApproximationError::measure(&approx, array![1.0].view()),
            Err(ApproxError::NotReady)
        );

        let approx = computed(5);
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(
            ApproximationError::measure(&approx, empty.view()),
            Err(ApproxError::EmptyGrid)
        );
    }

    #[test]
    fn test_convergence_study() {
        let study = ConvergenceStudy::new(ApproximatorConfig::new(0.0, 421.0, 1), vec![1, 10, 100]);
        let rows = study.run(linspace(-100.0, 1000.0, 500).view()).unwrap();

        assert_eq!(rows.iter().map(|r| r.n_max).collect::<Vec<_>>(), vec![1, 10, 100]);
        for pair in rows.windows(2) {
            assert!(pair[1].max_abs_error <= pair[0].max_abs_error);
        }
        for row in &rows {
            assert_relative_eq!(row.c0, 321.0_f64.powi(2) / 2.0 / 421.0, epsilon = 1e-8);
            assert_eq!(row.unconverged_integrals, 0);
        }
    }

    #[test]
    fn test_convergence_row_reports_missed_tolerance() {
        let settings = QuadratureSettings {
            abs_tolerance: 0.0,
            rel_tolerance: 0.0,
            max_subintervals: 2,
        };
        let config = ApproximatorConfig::new(0.0, 421.0, 1).with_quadrature(settings);
        let rows = ConvergenceStudy::new(config, vec![5])
            .run(linspace(-100.0, 1000.0, 50).view())
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unconverged_integrals, 2 * 5 + 1);
        assert!(rows[0].max_quadrature_error > 0.0);
    }

    #[test]
    fn test_convergence_study_rejects_zero_order() {
        let study = ConvergenceStudy::new(ApproximatorConfig::new(0.0, 421.0, 1), vec![0]);
        assert!(matches!(
            study.run(linspace(0.0, 1.0, 3).view()),
            Err(ApproxError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_default_study() {
        let study = ConvergenceStudy::default();
        assert_eq!(study.orders, DEFAULT_ORDERS.to_vec());
        assert_relative_eq!(study.config.strike_price, 100.0);
    }

    #[test]
    fn test_sample_grid() {
        let approx = computed(10);
        let grid = array![-100.0, 0.0, 250.0];
        let samples = sample_grid(&approx, grid.view()).unwrap();

        assert_eq!(samples.len(), 3);
        assert_relative_eq!(samples[0].reference, 221.0, epsilon = 1e-12);
        assert_relative_eq!(samples[2].reference, 150.0);
        assert_eq!(samples[1].series, approx.series(0.0).unwrap());
    }
}
