//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The evaluation grid cannot be built.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The configuration file could not be read.
    #[error("Cannot read configuration {path}: {source}")]
    ConfigRead {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file was rejected.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Parser or validation message.
        reason: String,
    },

    /// The approximator rejected the request.
    #[error(transparent)]
    Approximation(#[from] fourier_core::ApproxError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
