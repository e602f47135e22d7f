//! Sweep command implementation.
//!
//! Measures the maximum error of the series against the periodic payoff for
//! a list of harmonic counts.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fourier_core::analysis::{ConvergenceRow, ConvergenceStudy, DEFAULT_ORDERS};

use crate::commands::{resolve_config, Context, GridArgs, PayoffArgs};
use crate::output::{fixed, print_output, print_warning, sci};

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub payoff: PayoffArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Harmonic counts to evaluate (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_ORDERS)]
    pub orders: Vec<usize>,
}

/// One line of the sweep report.
#[derive(Debug, Serialize, Tabled)]
pub struct SweepRow {
    #[tabled(rename = "n_max")]
    pub n_max: usize,
    #[tabled(rename = "Relative Error", display_with = "sci")]
    pub relative_error: f64,
    #[tabled(rename = "Max Abs Error", display_with = "sci")]
    pub max_abs_error: f64,
    #[tabled(rename = "c0", display_with = "fixed")]
    pub c0: f64,
    #[tabled(rename = "Quadrature Error", display_with = "sci")]
    pub max_quadrature_error: f64,
    #[tabled(rename = "Unconverged")]
    pub unconverged: usize,
}

impl From<ConvergenceRow> for SweepRow {
    fn from(row: ConvergenceRow) -> Self {
        Self {
            n_max: row.n_max,
            relative_error: row.relative_error,
            max_abs_error: row.max_abs_error,
            c0: row.c0,
            max_quadrature_error: row.max_quadrature_error,
            unconverged: row.unconverged_integrals,
        }
    }
}

/// Executes the sweep command.
pub fn execute(args: SweepArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.payoff, None)?;
    let grid = args.grid.build()?;

    ctx.announce(
        "Convergence Sweep",
        &format!(
            "period [{}, {}], strike {}, grid {}..{} ({} points)",
            config.x_low,
            config.x_high,
            config.strike_price,
            args.grid.grid_start,
            args.grid.grid_end,
            args.grid.points
        ),
    );

    let study = ConvergenceStudy::new(config, args.orders);
    let rows: Vec<SweepRow> = study
        .run(grid.view())?
        .into_iter()
        .map(SweepRow::from)
        .collect();

    print_output(&rows, ctx.format)?;

    let unconverged: usize = rows.iter().map(|r| r.unconverged).sum();
    if unconverged > 0 && !ctx.quiet {
        print_warning(&format!(
            "{unconverged} integrals missed their tolerance; see the error estimates"
        ));
    }
    Ok(())
}
