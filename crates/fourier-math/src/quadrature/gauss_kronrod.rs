//! Adaptive 7/15-point Gauss-Kronrod quadrature.

use crate::error::MathResult;
use crate::quadrature::adaptive::{integrate_adaptive, PanelEstimate};
use crate::quadrature::{QuadratureConfig, QuadratureResult};

/// Kronrod abscissae on [-1, 1], positive half in decreasing order.
///
/// Odd indices are the 7-point Gauss nodes; the last entry is the center.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Weights of the 15-point Kronrod rule.
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Weights of the embedded 7-point Gauss rule.
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Applies the 15-point Kronrod rule on `[a, b]` with the embedded Gauss
/// rule as error reference.
pub(crate) fn gk15_panel<F>(f: &F, a: f64, b: f64) -> PanelEstimate
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half_length = 0.5 * (b - a);

    let f_center = f(center);
    let mut result_kronrod = f_center * WGK[7];
    let mut result_gauss = f_center * WG[3];
    let mut result_abs = result_kronrod.abs();

    let mut f_left = [0.0; 7];
    let mut f_right = [0.0; 7];
    for j in 0..7 {
        let dx = half_length * XGK[j];
        let f1 = f(center - dx);
        let f2 = f(center + dx);
        f_left[j] = f1;
        f_right[j] = f2;

        result_kronrod += WGK[j] * (f1 + f2);
        result_abs += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            result_gauss += WG[j / 2] * (f1 + f2);
        }
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = WGK[7] * (f_center - mean).abs();
    for j in 0..7 {
        result_asc += WGK[j] * ((f_left[j] - mean).abs() + (f_right[j] - mean).abs());
    }

    let value = result_kronrod * half_length;
    let result_abs = result_abs * half_length.abs();
    let result_asc = result_asc * half_length.abs();

    let mut error = ((result_kronrod - result_gauss) * half_length).abs();
    if result_asc != 0.0 && error != 0.0 {
        error = result_asc * (200.0 * error / result_asc).powf(1.5).min(1.0);
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * result_abs);
    }

    PanelEstimate {
        value,
        error,
        evaluations: 15,
    }
}

/// Integrates `f` over `[a, b]` with adaptive Gauss-Kronrod quadrature.
///
/// Exact for polynomials up to degree 22 on every panel. The panel with the
/// largest error estimate is bisected until the total error estimate falls
/// below `max(abs_tolerance, rel_tolerance * |value|)` or the panel limit is
/// reached.
///
/// # Arguments
///
/// * `f` - The integrand
/// * `a` - Lower bound
/// * `b` - Upper bound
/// * `breakpoints` - Interior points where `f` or a derivative jumps
/// * `config` - Quadrature configuration
///
/// # Returns
///
/// The integral with its error estimate. Missing the tolerance sets
/// `converged = false` rather than returning an error.
///
/// # Example
///
/// ```rust
/// use fourier_math::quadrature::{gauss_kronrod, QuadratureConfig};
///
/// // ∫_0^2 max(0, x - 1) dx = 0.5, kink at x = 1
/// let f = |x: f64| (x - 1.0).max(0.0);
/// let result = gauss_kronrod(f, 0.0, 2.0, &[1.0], &QuadratureConfig::default()).unwrap();
///
/// assert!((result.value - 0.5).abs() < 1e-14);
/// assert_eq!(result.subintervals, 2);
/// ```
pub fn gauss_kronrod<F>(
    f: F,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    config: &QuadratureConfig,
) -> MathResult<QuadratureResult>
where
    F: Fn(f64) -> f64,
{
    integrate_adaptive(|lo, hi| gk15_panel(&f, lo, hi), a, b, breakpoints, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polynomial_single_panel() {
        let result =
            gauss_kronrod(|x: f64| x.powi(5), 0.0, 2.0, &[], &QuadratureConfig::default())
                .unwrap();

        assert_relative_eq!(result.value, 64.0 / 6.0, epsilon = 1e-12);
        assert_eq!(result.subintervals, 1);
        assert_eq!(result.evaluations, 15);
        assert!(result.converged);
    }

    #[test]
    fn test_sin() {
        let result =
            gauss_kronrod(|x: f64| x.sin(), 0.0, PI, &[], &QuadratureConfig::default()).unwrap();

        assert_relative_eq!(result.value, 2.0, epsilon = 1e-13);
        assert!(result.abs_error < 1e-8);
    }

    #[test]
    fn test_kink_with_breakpoint() {
        let f = |x: f64| (x - 0.3).abs();
        let result = gauss_kronrod(f, 0.0, 1.0, &[0.3], &QuadratureConfig::default()).unwrap();

        // 0.3²/2 + 0.7²/2
        assert_relative_eq!(result.value, 0.29, epsilon = 1e-14);
        assert_eq!(result.subintervals, 2);
    }

    #[test]
    fn test_kink_without_breakpoint_needs_subdivision() {
        let f = |x: f64| (x - 1.0 / 3.0).abs();
        let result = gauss_kronrod(f, 0.0, 1.0, &[], &QuadratureConfig::default()).unwrap();

        let exact = (1.0 / 9.0 + 4.0 / 9.0) / 2.0;
        assert!(result.converged);
        assert!(result.subintervals > 2);
        assert_relative_eq!(result.value, exact, epsilon = 1e-8);
    }

    #[test]
    fn test_sqrt_endpoint() {
        let config = QuadratureConfig::default().with_max_subintervals(200);
        let result = gauss_kronrod(|x: f64| x.sqrt(), 0.0, 1.0, &[], &config).unwrap();

        assert_relative_eq!(result.value, 2.0 / 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_panel_limit() {
        let f = |x: f64| (x - 1.0 / 3.0).abs();
        let config = QuadratureConfig::default().with_max_subintervals(1);
        let result = gauss_kronrod(f, 0.0, 1.0, &[], &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.subintervals, 1);
        assert!(result.abs_error > config.tolerance_for(result.value));
    }

    #[test]
    fn test_invalid_bounds() {
        let config = QuadratureConfig::default();
        assert!(gauss_kronrod(|x| x, 1.0, 0.0, &[], &config).is_err());
        assert!(gauss_kronrod(|x| x, f64::NAN, 1.0, &[], &config).is_err());
    }

    proptest! {
        #[test]
        fn prop_cubic_exact(
            c0 in -10.0..10.0f64,
            c1 in -10.0..10.0f64,
            c2 in -10.0..10.0f64,
            c3 in -10.0..10.0f64,
            a in -5.0..0.0f64,
            width in 0.1..5.0f64,
        ) {
            let b = a + width;
            let f = |x: f64| c0 + x * (c1 + x * (c2 + x * c3));
            let antiderivative =
                |x: f64| x * (c0 + x * (c1 / 2.0 + x * (c2 / 3.0 + x * c3 / 4.0)));
            let exact = antiderivative(b) - antiderivative(a);

            let result = gauss_kronrod(f, a, b, &[], &QuadratureConfig::default()).unwrap();
            prop_assert!((result.value - exact).abs() <= 1e-10 * (1.0 + exact.abs()));
        }
    }
}
