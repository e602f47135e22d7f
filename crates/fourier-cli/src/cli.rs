//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{CoefficientsArgs, SampleArgs, SweepArgs};

/// Fourier - Truncated Fourier series of a periodic call payoff
#[derive(Parser)]
#[command(name = "fourier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// TOML file with bounds, strike, n_max and quadrature tolerances
    #[arg(short, long, global = true, env = "FOURIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Measure the series error over several harmonic counts
    Sweep(SweepArgs),

    /// List the Fourier coefficients and their error estimates
    Coefficients(CoefficientsArgs),

    /// Sample the payoff and the series on a grid
    Sample(SampleArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (space-separated values, no header)
    Minimal,
}
