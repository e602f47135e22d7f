//! # Fourier Core
//!
//! Truncated Fourier series approximation of a periodic call payoff.
//!
//! This crate provides:
//!
//! - **Payoff**: `max(0, x - strike)` on one period and its periodic extension
//! - **Coefficients**: `c0`, `a[n]`, `b[n]` by oscillatory quadrature with error estimates
//! - **Series**: Evaluation of the truncated series at scalars and arrays
//! - **Analysis**: Error measurement and convergence studies over `n_max`
//!
//! ## Design Philosophy
//!
//! - **Explicit Lifecycle**: Construct, compute coefficients, then evaluate
//! - **Borrowed Inputs**: Batch operations never modify the caller's array
//! - **No Global State**: Everything belongs to the approximator instance
//!
//! ## Example
//!
//! ```rust
//! use fourier_core::prelude::*;
//! use ndarray::array;
//!
//! let mut approx = FourierApproximator::new(0.0, 421.0, 100, 100.0).unwrap();
//! approx.compute_coefficients().unwrap();
//!
//! let x = array![-50.0, 150.0, 400.0];
//! let series = approx.series_batch(x.view()).unwrap();
//! assert_eq!(series.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod analysis;
pub mod approximator;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod payoff;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{
        linspace, sample_grid, ApproximationError, ConvergenceRow, ConvergenceStudy,
        SeriesSample, DEFAULT_ORDERS,
    };
    pub use crate::approximator::FourierApproximator;
    pub use crate::coefficients::{CoefficientSet, Harmonic};
    pub use crate::config::{ApproximatorConfig, QuadratureSettings, DEFAULT_STRIKE_PRICE};
    pub use crate::error::{ApproxError, ApproxResult};
    pub use crate::payoff::CallPayoff;
}

// Re-export commonly used types at crate root
pub use approximator::FourierApproximator;
pub use coefficients::{CoefficientSet, Harmonic};
pub use config::{ApproximatorConfig, QuadratureSettings, DEFAULT_STRIKE_PRICE};
pub use error::{ApproxError, ApproxResult};
pub use payoff::CallPayoff;
