//! Globally adaptive subdivision driver shared by all panel rules.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{MathError, MathResult};
use crate::quadrature::{QuadratureConfig, QuadratureResult};

/// Integral estimate of a single panel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelEstimate {
    /// Panel integral.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub error: f64,
    /// Integrand evaluations spent on the panel.
    pub evaluations: usize,
}

/// A panel waiting in the priority queue, ordered by error.
#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Panel {}

impl PartialOrd for Panel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Panel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Returns true when bisecting `[a, b]` no longer produces distinct points.
fn too_narrow(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    (b - a) <= 100.0 * f64::EPSILON * scale
}

/// Integrates over `[a, b]` by repeatedly bisecting the panel with the largest
/// error estimate until the total error fits the tolerance.
pub(crate) fn integrate_adaptive<R>(
    rule: R,
    a: f64,
    b: f64,
    breakpoints: &[f64],
    config: &QuadratureConfig,
) -> MathResult<QuadratureResult>
where
    R: Fn(f64, f64) -> PanelEstimate,
{
    config.validate()?;

    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::NonFiniteBounds { a, b });
    }
    if a > b {
        return Err(MathError::InvertedInterval { a, b });
    }
    if a == b {
        return Ok(QuadratureResult::zero());
    }

    let mut edges: Vec<f64> = breakpoints
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > a && *p < b)
        .collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    edges.insert(0, a);
    edges.push(b);

    let mut heap = BinaryHeap::with_capacity(config.max_subintervals.max(edges.len()));
    let mut total = 0.0;
    let mut total_error = 0.0;
    let mut evaluations = 0;

    for window in edges.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        let estimate = rule(lo, hi);
        total += estimate.value;
        total_error += estimate.error;
        evaluations += estimate.evaluations;
        heap.push(Panel {
            a: lo,
            b: hi,
            value: estimate.value,
            error: estimate.error,
        });
    }

    let limit = config.max_subintervals.max(heap.len());
    let mut exhausted_precision = false;

    while total_error > config.tolerance_for(total) && heap.len() < limit {
        let Some(worst) = heap.pop() else { break };

        if too_narrow(worst.a, worst.b) {
            heap.push(worst);
            exhausted_precision = true;
            break;
        }

        let mid = 0.5 * (worst.a + worst.b);
        let left = rule(worst.a, mid);
        let right = rule(mid, worst.b);
        evaluations += left.evaluations + right.evaluations;

        total += left.value + right.value - worst.value;
        total_error += left.error + right.error - worst.error;

        heap.push(Panel {
            a: worst.a,
            b: mid,
            value: left.value,
            error: left.error,
        });
        heap.push(Panel {
            a: mid,
            b: worst.b,
            value: right.value,
            error: right.error,
        });
    }

    // Resum to shed the drift of the running updates.
    let value: f64 = heap.iter().map(|p| p.value).sum();
    let abs_error: f64 = heap.iter().map(|p| p.error).sum();
    let converged = abs_error <= config.tolerance_for(value);

    if converged {
        log::debug!(
            "quadrature on [{a}, {b}] converged: {} panels, {evaluations} evaluations",
            heap.len()
        );
    } else if exhausted_precision {
        log::warn!(
            "quadrature on [{a}, {b}] stopped at machine precision with error estimate {abs_error:.2e}"
        );
    } else {
        log::warn!(
            "quadrature on [{a}, {b}] hit the {limit}-panel limit with error estimate {abs_error:.2e}"
        );
    }

    Ok(QuadratureResult {
        value,
        abs_error,
        evaluations,
        subintervals: heap.len(),
        converged,
    })
}
