//! # Fourier Math
//!
//! Numerical integration for the Fourier payoff workspace.
//!
//! This crate provides:
//!
//! - **Gauss-Kronrod**: Globally adaptive 7/15-point Gauss-Kronrod quadrature
//! - **Oscillatory**: Adaptive Filon-type quadrature for `f(x) cos(ωx)` and `f(x) sin(ωx)`
//! - **Breakpoints**: Known kinks of the integrand seed the initial subdivision
//!
//! ## Design Philosophy
//!
//! - **Error Estimates Everywhere**: Every integral reports its estimated absolute error
//! - **Soft Failure**: Missing the tolerance is reported, not raised
//! - **Closures In**: Integrands are plain `Fn(f64) -> f64`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]

pub mod error;
pub mod quadrature;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::quadrature::{
        gauss_kronrod, oscillatory, GaussKronrodIntegrator, Integrator, OscillatoryIntegrator,
        OscillatoryWeight, QuadratureConfig, QuadratureResult,
    };
}

pub use error::{MathError, MathResult};
