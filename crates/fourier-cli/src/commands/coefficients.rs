//! Coefficients command implementation.
//!
//! Lists `c0`, `a[n]` and `b[n]` with the quadrature error estimate of each.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fourier_core::{CoefficientSet, FourierApproximator, Harmonic};

use crate::commands::{resolve_config, Context, PayoffArgs};
use crate::output::{print_output, print_warning, sci};

/// Arguments for the coefficients command.
#[derive(Args, Debug)]
pub struct CoefficientsArgs {
    #[command(flatten)]
    pub payoff: PayoffArgs,

    /// Number of harmonics
    #[arg(short, long)]
    pub n_max: Option<usize>,
}

/// One coefficient pair. Row 0 carries `c0` in the cosine column.
#[derive(Debug, Serialize, Tabled)]
pub struct CoefficientRow {
    #[tabled(rename = "n")]
    pub n: usize,
    #[tabled(rename = "a[n]", display_with = "sci")]
    pub a: f64,
    #[tabled(rename = "b[n]", display_with = "sci")]
    pub b: f64,
    #[tabled(rename = "a error", display_with = "sci")]
    pub a_error: f64,
    #[tabled(rename = "b error", display_with = "sci")]
    pub b_error: f64,
}

impl From<Harmonic> for CoefficientRow {
    fn from(h: Harmonic) -> Self {
        Self {
            n: h.n,
            a: h.a,
            b: h.b,
            a_error: h.a_error,
            b_error: h.b_error,
        }
    }
}

fn rows(set: &CoefficientSet) -> Vec<CoefficientRow> {
    let mean = CoefficientRow {
        n: 0,
        a: set.c0(),
        b: 0.0,
        a_error: set.c0_error(),
        b_error: 0.0,
    };
    std::iter::once(mean)
        .chain(set.harmonics().map(CoefficientRow::from))
        .collect()
}

/// Executes the coefficients command.
pub fn execute(args: CoefficientsArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.payoff, args.n_max)?;
    let mut approx = FourierApproximator::from_config(config)?;

    ctx.announce(
        "Fourier Coefficients",
        &format!(
            "period [{}, {}], strike {}, {} harmonics",
            config.x_low, config.x_high, config.strike_price, config.n_max
        ),
    );

    let set = approx.compute_coefficients()?;
    print_output(&rows(set), ctx.format)?;

    if set.unconverged() > 0 && !ctx.quiet {
        print_warning(&format!(
            "{} integrals missed their tolerance (largest error {:.2e})",
            set.unconverged(),
            set.max_error_estimate()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_is_row_zero() {
        let mut approx = FourierApproximator::new(0.0, 421.0, 3, 100.0).unwrap();
        let set = approx.compute_coefficients().unwrap();
        let rows = rows(set);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].n, 0);
        assert_eq!(rows[0].a, set.c0());
        assert_eq!(rows[0].b, 0.0);
        assert_eq!(rows[3].n, 3);
        assert_eq!(Some(rows[3].b), set.b(3));
    }
}
