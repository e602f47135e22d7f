//! Fourier CLI - Reports for the truncated Fourier series of a call payoff.
//!
//! # Usage
//!
//! ```bash
//! # Error of the series for n_max = 1, 10, 100, 1000, 10000
//! fourier sweep
//!
//! # Coefficients of a 20-harmonic series
//! fourier coefficients --n-max 20
//!
//! # Reference and series on a grid, ready for plotting
//! fourier sample --n-max 100 --format csv > sample.csv
//!
//! # Bounds and tolerances from a file
//! fourier --config payoff.toml sweep --orders 10,100
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library log records reach this subscriber through the log bridge
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config: cli.config.clone(),
    };

    match cli.command {
        Commands::Sweep(args) => commands::sweep::execute(args, &ctx)?,
        Commands::Coefficients(args) => commands::coefficients::execute(args, &ctx)?,
        Commands::Sample(args) => commands::sample::execute(args, &ctx)?,
    }

    Ok(())
}
