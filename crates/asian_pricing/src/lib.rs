//! # asian_pricing: Binomial Asian Call Engines
//!
//! ## Layer 2 Role
//!
//! Two independent engines price the same arithmetic-average call on the
//! multiplicative binomial tree of [`asian_core`]:
//!
//! - [`tree`]: exact enumeration of all `2^n` move sequences, each weighted
//!   by its risk-neutral mass
//! - [`mc`]: Monte Carlo estimation with paths drawn directly under the
//!   risk-neutral measure
//!
//! Neither engine calls the other; each derives the measure from the model.
//! They agree asymptotically when run under the same
//! [`DiscountConvention`].
//!
//! ## Usage Example
//!
//! ```rust
//! use asian_pricing::{enumerate_price, simulate_price};
//!
//! // S, K, r, up, down, n_steps
//! let exact = enumerate_price(100.0, 100.0, 0.05, 0.2, -0.3, 4).unwrap();
//! assert!((exact - 14.4616).abs() < 1e-4);
//!
//! // S, K, up, down, r, n_periods, n_runs (continuous discounting)
//! let estimate = simulate_price(100.0, 100.0, 0.2, -0.3, 0.05, 4, 10_000).unwrap();
//! assert!(estimate > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod mc;
pub mod rng;
pub mod tree;

use asian_core::types::{BinomialModel, DiscountConvention};

pub use error::PricingError;
pub use mc::{MonteCarloConfig, MonteCarloPricer, PricingResult};
pub use rng::PathRng;
pub use tree::PathEnumerator;

/// Exact price by path enumeration, discounted by `(1 + r)^n_steps`.
///
/// # Errors
///
/// Returns `PricingError::Model` for invalid parameters, arbitrage
/// (`Pu ∉ [0, 1]`), `n_steps > 30`, or numeric overflow.
pub fn enumerate_price(
    spot: f64,
    strike: f64,
    rate: f64,
    up: f64,
    down: f64,
    n_steps: usize,
) -> Result<f64, PricingError> {
    let model = BinomialModel::new(spot, strike, rate, up, down)?;
    Ok(PathEnumerator::new(model, n_steps)?.price()?)
}

/// Monte Carlo estimate drawn from the thread-local generator, discounted
/// by `exp(-r · n_periods)`.
///
/// Use [`mc::simulate_price_with_rng`] to inject a seeded generator, or
/// [`MonteCarloPricer`] for seeded, parallel and matched-convention runs.
///
/// # Errors
///
/// - `PricingError::Config` for run/period counts out of range
/// - `PricingError::Model` for invalid parameters, arbitrage, or overflow
pub fn simulate_price(
    spot: f64,
    strike: f64,
    up: f64,
    down: f64,
    rate: f64,
    n_periods: usize,
    n_runs: usize,
) -> Result<f64, PricingError> {
    let model = BinomialModel::new(spot, strike, rate, up, down)?;
    mc::simulate_price_with_rng(
        &model,
        n_periods,
        n_runs,
        DiscountConvention::Continuous,
        &mut rand::thread_rng(),
    )
}
