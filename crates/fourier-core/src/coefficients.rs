//! Fourier coefficients of the truncated series.

use serde::Serialize;

/// One harmonic of the series with its quadrature error estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Harmonic {
    /// Harmonic index, starting at 1.
    pub n: usize,
    /// Cosine coefficient `a[n]`.
    pub a: f64,
    /// Sine coefficient `b[n]`.
    pub b: f64,
    /// Error estimate of `a[n]`.
    pub a_error: f64,
    /// Error estimate of `b[n]`.
    pub b_error: f64,
}

/// Coefficients `c0`, `a[1..=n_max]`, `b[1..=n_max]` of the series
/// `c0 + Σ a[n] cos(nωx) + b[n] sin(nωx)`.
///
/// Each coefficient carries the error estimate of the integral it came from,
/// already scaled by the same prefactor as the coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientSet {
    c0: f64,
    c0_error: f64,
    a: Vec<f64>,
    b: Vec<f64>,
    a_error: Vec<f64>,
    b_error: Vec<f64>,
    unconverged: usize,
}

impl CoefficientSet {
    /// Creates an empty set holding only the mean term.
    pub(crate) fn with_mean(c0: f64, c0_error: f64, n_max: usize) -> Self {
        Self {
            c0,
            c0_error,
            a: Vec::with_capacity(n_max),
            b: Vec::with_capacity(n_max),
            a_error: Vec::with_capacity(n_max),
            b_error: Vec::with_capacity(n_max),
            unconverged: 0,
        }
    }

    /// Appends the next harmonic.
    pub(crate) fn push(&mut self, a: f64, a_error: f64, b: f64, b_error: f64) {
        self.a.push(a);
        self.a_error.push(a_error);
        self.b.push(b);
        self.b_error.push(b_error);
    }

    /// Records an integral that missed its tolerance.
    pub(crate) fn record_unconverged(&mut self) {
        self.unconverged += 1;
    }

    /// Mean value (DC component).
    pub fn c0(&self) -> f64 {
        self.c0
    }

    /// Error estimate of the mean value.
    pub fn c0_error(&self) -> f64 {
        self.c0_error
    }

    /// Number of harmonics.
    pub fn n_max(&self) -> usize {
        self.a.len()
    }

    /// Cosine coefficient `a[n]` for `1 <= n <= n_max`.
    pub fn a(&self, n: usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.a.get(i).copied())
    }

    /// Sine coefficient `b[n]` for `1 <= n <= n_max`.
    pub fn b(&self, n: usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.b.get(i).copied())
    }

    /// Cosine coefficients in harmonic order.
    pub fn cosine(&self) -> &[f64] {
        &self.a
    }

    /// Sine coefficients in harmonic order.
    pub fn sine(&self) -> &[f64] {
        &self.b
    }

    /// Iterates over the harmonics in order.
    pub fn harmonics(&self) -> impl Iterator<Item = Harmonic> + '_ {
        (0..self.a.len()).map(move |i| Harmonic {
            n: i + 1,
            a: self.a[i],
            b: self.b[i],
            a_error: self.a_error[i],
            b_error: self.b_error[i],
        })
    }

    /// Largest error estimate over all coefficients.
    pub fn max_error_estimate(&self) -> f64 {
        self.a_error
            .iter()
            .chain(&self.b_error)
            .fold(self.c0_error, |acc, e| acc.max(*e))
    }

    /// Number of integrals that did not reach the requested tolerance.
    pub fn unconverged(&self) -> usize {
        self.unconverged
    }

    /// Sums the truncated series at `x` for base angular frequency `omega`.
    pub(crate) fn evaluate(&self, omega: f64, x: f64) -> f64 {
        self.a
            .iter()
            .zip(&self.b)
            .enumerate()
            .fold(self.c0, |sum, (i, (a, b))| {
                let (sin, cos) = ((i + 1) as f64 * omega * x).sin_cos();
                sum + a * cos + b * sin
            })
    }
}
