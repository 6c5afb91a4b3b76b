//! Error types for binomial model construction and pricing.
//!
//! This module provides:
//! - `ModelError`: Errors raised when a model is invalid, admits arbitrage,
//!   or overflows the representable range during pricing

use thiserror::Error;

/// Binomial model errors.
///
/// Both pricing engines surface these to the immediate caller; there is no
/// meaningful local recovery from an invalid financial model.
///
/// # Variants
/// - `InvalidModel`: Derived risk-neutral up-probability outside [0, 1]
/// - `InvalidParameter`: A scalar parameter violates its domain
/// - `NumericOverflow`: Path prices or the final price are not finite
///
/// # Examples
/// ```
/// use asian_core::types::ModelError;
///
/// let err = ModelError::InvalidModel { up_probability: 1.5 };
/// assert!(format!("{}", err).contains("arbitrage"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// The up/down/rate combination admits arbitrage.
    #[error("Invalid model: risk-neutral up-probability {up_probability} outside [0, 1] (arbitrage)")]
    InvalidModel {
        /// The derived up-probability
        up_probability: f64,
    },

    /// A parameter lies outside its admissible domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// A price along a path, or the aggregated price, is not finite.
    #[error("Numeric overflow: {context}")]
    NumericOverflow {
        /// Where the overflow was detected
        context: String,
    },
}

impl ModelError {
    /// Shorthand for [`ModelError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ModelError::NumericOverflow`].
    pub fn overflow(context: impl Into<String>) -> Self {
        ModelError::NumericOverflow {
            context: context.into(),
        }
    }
}
