//! # asian_core: Binomial Model Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! asian_core is the bottom layer of the workspace, providing:
//! - Model parameters for the multiplicative binomial tree (`types::model`)
//! - Discounting conventions (`types::discount`)
//! - Error taxonomy: `ModelError` (`types::error`)
//! - Risk-neutral probability derivation (`math::probability`)
//! - Arithmetic-average path outcomes and the Asian call payoff (`math::payoff`)
//!
//! Both pricing engines in `asian_pricing` build on these primitives and
//! never call each other.
//!
//! ## Usage Examples
//!
//! ```rust
//! use asian_core::math::probability::RiskNeutralProbability;
//! use asian_core::types::BinomialModel;
//!
//! let model = BinomialModel::new(100.0, 100.0, 0.05, 0.2, -0.3).unwrap();
//! let probs = RiskNeutralProbability::from_model(&model).unwrap();
//!
//! assert!((probs.up() - 0.7).abs() < 1e-12);
//! assert!((probs.up() + probs.down() - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `BinomialModel` and `DiscountConvention`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use math::payoff::{PathAccumulator, PathOutcome};
pub use math::probability::{derive_probabilities, RiskNeutralProbability};
pub use types::{BinomialModel, DiscountConvention, ModelError};
