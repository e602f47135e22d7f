//! CLI command implementations.

pub mod coefficients;
pub mod sample;
pub mod sweep;

// Re-export submodules for convenience
pub use coefficients::CoefficientsArgs;
pub use sample::SampleArgs;
pub use sweep::SweepArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use fourier_core::analysis::linspace;
use fourier_core::ApproximatorConfig;
use ndarray::Array1;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info};

/// Lower bound used when neither a flag nor a file sets one.
pub const DEFAULT_X_LOW: f64 = 0.0;
/// Upper bound used when neither a flag nor a file sets one.
pub const DEFAULT_X_HIGH: f64 = 421.0;
/// Harmonic count used when neither a flag nor a file sets one.
pub const DEFAULT_N_MAX: usize = 100;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config: Option<PathBuf>,
}

impl Context {
    /// Prints a section title and a parameter line in table mode.
    pub fn announce(&self, title: &str, details: &str) {
        if self.format == OutputFormat::Table && !self.quiet {
            print_header(title);
            print_info(details);
        }
    }
}

/// Payoff parameters; each flag overrides the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct PayoffArgs {
    /// Lower bound of one period
    #[arg(long, allow_negative_numbers = true)]
    pub x_low: Option<f64>,

    /// Upper bound of one period
    #[arg(long, allow_negative_numbers = true)]
    pub x_high: Option<f64>,

    /// Strike price (kink of the payoff)
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,
}

/// Evaluation grid.
#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// First grid point
    #[arg(long, default_value_t = -100.0, allow_negative_numbers = true)]
    pub grid_start: f64,

    /// Last grid point
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub grid_end: f64,

    /// Number of grid points
    #[arg(short, long, default_value_t = 500)]
    pub points: usize,
}

impl GridArgs {
    /// Builds the grid after checking its parameters.
    pub fn build(&self) -> CliResult<Array1<f64>> {
        if self.points == 0 {
            return Err(CliError::InvalidGrid("at least one point is required".into()));
        }
        if !self.grid_start.is_finite() || !self.grid_end.is_finite() {
            return Err(CliError::InvalidGrid(format!(
                "bounds must be finite, got {} and {}",
                self.grid_start, self.grid_end
            )));
        }
        if self.grid_start > self.grid_end {
            return Err(CliError::InvalidGrid(format!(
                "start {} lies above end {}",
                self.grid_start, self.grid_end
            )));
        }
        Ok(linspace(self.grid_start, self.grid_end, self.points))
    }
}

/// Resolves the approximator configuration.
///
/// Defaults come first, then the configuration file, then explicit flags.
pub fn resolve_config(
    ctx: &Context,
    payoff: &PayoffArgs,
    n_max: Option<usize>,
) -> CliResult<ApproximatorConfig> {
    let mut config = match &ctx.config {
        Some(path) => load_config(path)?,
        None => ApproximatorConfig::new(DEFAULT_X_LOW, DEFAULT_X_HIGH, DEFAULT_N_MAX),
    };

    if let Some(x_low) = payoff.x_low {
        config.x_low = x_low;
    }
    if let Some(x_high) = payoff.x_high {
        config.x_high = x_high;
    }
    if let Some(strike) = payoff.strike {
        config.strike_price = strike;
    }
    if let Some(n_max) = n_max {
        config.n_max = n_max;
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> CliResult<ApproximatorConfig> {
    tracing::debug!("loading configuration from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    ApproximatorConfig::from_toml_str(&text).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context {
            format: OutputFormat::Json,
            quiet: true,
            config: None,
        }
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = resolve_config(&ctx(), &PayoffArgs::default(), None).unwrap();
        assert_eq!(config.x_high, DEFAULT_X_HIGH);
        assert_eq!(config.n_max, DEFAULT_N_MAX);

        let payoff = PayoffArgs {
            strike: Some(250.0),
            ..PayoffArgs::default()
        };
        let config = resolve_config(&ctx(), &payoff, Some(7)).unwrap();
        assert_eq!(config.strike_price, 250.0);
        assert_eq!(config.n_max, 7);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let payoff = PayoffArgs {
            strike: Some(500.0),
            ..PayoffArgs::default()
        };
        assert!(matches!(
            resolve_config(&ctx(), &payoff, None),
            Err(CliError::Approximation(_))
        ));
    }

    #[test]
    fn test_grid_validation() {
        let grid = GridArgs {
            grid_start: -100.0,
            grid_end: 1000.0,
            points: 500,
        };
        assert_eq!(grid.build().unwrap().len(), 500);

        let empty = GridArgs { points: 0, ..grid.clone() };
        assert!(matches!(empty.build(), Err(CliError::InvalidGrid(_))));

        let inverted = GridArgs {
            grid_start: 5.0,
            grid_end: 1.0,
            ..grid
        };
        assert!(matches!(inverted.build(), Err(CliError::InvalidGrid(_))));
    }
}
