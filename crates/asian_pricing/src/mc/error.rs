//! Error types for the Monte Carlo estimator configuration.

use std::fmt;

/// Configuration error for the Monte Carlo pricer.
///
/// Raised at construction when run or period counts fall outside the
/// supported range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Run count outside valid range [1, 10_000_000].
    InvalidRunCount(usize),
    /// Period count outside valid range [1, 10_000].
    InvalidPeriodCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRunCount(count) => {
                write!(
                    f,
                    "Invalid run count {}: must be in range [1, 10_000_000]",
                    count
                )
            }
            Self::InvalidPeriodCount(count) => {
                write!(
                    f,
                    "Invalid period count {}: must be in range [1, 10_000]",
                    count
                )
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
