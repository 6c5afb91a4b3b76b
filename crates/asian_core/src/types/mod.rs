//! Core value types for the binomial model.
//!
//! - [`BinomialModel`]: validated spot/strike/rate/up/down parameters
//! - [`DiscountConvention`]: discrete or continuous present-value factor
//! - [`ModelError`]: structured error for invalid or overflowing models

pub mod discount;
pub mod error;
pub mod model;

pub use discount::DiscountConvention;
pub use error::ModelError;
pub use model::BinomialModel;
