//! Error type for the pricing entry points.

use asian_core::types::ModelError;
use thiserror::Error;

use crate::mc::ConfigError;

/// Errors surfaced by [`enumerate_price`](crate::enumerate_price) and
/// [`simulate_price`](crate::simulate_price).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Invalid model, arbitrage, or numeric overflow.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Run or period counts out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
