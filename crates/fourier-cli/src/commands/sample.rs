//! Sample command implementation.
//!
//! Prints the periodic payoff and the truncated series side by side on a grid,
//! the input of an external plotting tool.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fourier_core::analysis::{sample_grid, SeriesSample};
use fourier_core::FourierApproximator;

use crate::commands::{resolve_config, Context, GridArgs, PayoffArgs};
use crate::output::{fixed, print_output, sci};

/// Arguments for the sample command.
#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub payoff: PayoffArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of harmonics
    #[arg(short, long)]
    pub n_max: Option<usize>,
}

/// One grid point of the comparison.
#[derive(Debug, Serialize, Tabled)]
pub struct SampleRow {
    #[tabled(rename = "x", display_with = "fixed")]
    pub x: f64,
    #[tabled(rename = "Payoff", display_with = "fixed")]
    pub reference: f64,
    #[tabled(rename = "Series", display_with = "fixed")]
    pub series: f64,
    #[tabled(rename = "Error", display_with = "sci")]
    pub error: f64,
}

impl From<SeriesSample> for SampleRow {
    fn from(s: SeriesSample) -> Self {
        Self {
            x: s.x,
            reference: s.reference,
            series: s.series,
            error: (s.reference - s.series).abs(),
        }
    }
}

/// Executes the sample command.
pub fn execute(args: SampleArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.payoff, args.n_max)?;
    let grid = args.grid.build()?;
    let mut approx = FourierApproximator::from_config(config)?;
    approx.compute_coefficients()?;

    ctx.announce(
        "Series Sample",
        &format!(
            "period [{}, {}], strike {}, {} harmonics, {} points",
            config.x_low,
            config.x_high,
            config.strike_price,
            config.n_max,
            grid.len()
        ),
    );

    let rows: Vec<SampleRow> = sample_grid(&approx, grid.view())?
        .into_iter()
        .map(SampleRow::from)
        .collect();
    print_output(&rows, ctx.format)
}
