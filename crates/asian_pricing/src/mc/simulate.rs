//! Single-threaded estimator over a caller-supplied generator.
//!
//! This is the plain form of the estimator: one generator, runs in order,
//! discounted sample mean. Tests inject a seeded generator; the top-level
//! [`simulate_price`](crate::simulate_price) uses the thread-local one.

use asian_core::math::probability::RiskNeutralProbability;
use asian_core::types::{BinomialModel, DiscountConvention, ModelError};
use rand::Rng;

use super::config::validate_counts;
use super::paths::{checked_outcome, simulate_outcome};
use crate::error::PricingError;

/// Estimates the option price with `n_runs` paths of `n_periods` periods
/// drawn from `rng`.
///
/// # Errors
///
/// - `PricingError::Config` for run/period counts out of range
/// - `PricingError::Model` for invalid, arbitrage or overflowing models
///
/// # Examples
///
/// ```rust
/// use asian_core::types::{BinomialModel, DiscountConvention};
/// use asian_pricing::mc::simulate_price_with_rng;
/// use asian_pricing::rng::PathRng;
///
/// let mut rng = PathRng::from_seed(42);
/// let price = simulate_price_with_rng(
///     &BinomialModel::default(),
///     4,
///     10_000,
///     DiscountConvention::Continuous,
///     &mut rng,
/// )
/// .unwrap();
/// assert!(price > 0.0);
/// ```
pub fn simulate_price_with_rng<R: Rng + ?Sized>(
    model: &BinomialModel,
    n_periods: usize,
    n_runs: usize,
    discount: DiscountConvention,
    rng: &mut R,
) -> Result<f64, PricingError> {
    validate_counts(n_runs, n_periods)?;
    model.validate()?;
    let probs = RiskNeutralProbability::from_model(model)?;

    let mut total = 0.0;
    for _ in 0..n_runs {
        let outcome = simulate_outcome(model, &probs, n_periods, &mut *rng);
        total += checked_outcome(outcome, n_periods)?.payoff;
    }
    let price = discount.factor(model.rate, n_periods) * (total / n_runs as f64);

    if !price.is_finite() {
        return Err(ModelError::overflow(format!(
            "Monte Carlo estimate is not finite ({})",
            price
        ))
        .into());
    }
    Ok(price)
}
