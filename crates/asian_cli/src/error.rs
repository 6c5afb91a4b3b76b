//! CLI error types

use asian_core::types::ModelError;
use asian_pricing::mc::ConfigError as MonteCarloConfigError;
use asian_pricing::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `asian` commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing failed (invalid model, arbitrage, overflow, bad counts)
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Configuration could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Referenced file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument rejected before pricing
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ModelError> for CliError {
    fn from(err: ModelError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<MonteCarloConfigError> for CliError {
    fn from(err: MonteCarloConfigError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
