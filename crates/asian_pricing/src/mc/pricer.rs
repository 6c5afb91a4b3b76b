//! Monte Carlo pricing engine.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Risk-neutral probability derivation and model validation
//! 2. Per-block random streams (via [`PathRng`](crate::rng::PathRng))
//! 3. Path simulation (via [`outcome_from_draws`](super::paths::outcome_from_draws))
//! 4. Block statistics merged in block order
//! 5. Discounting under the configured convention
//!
//! # Reproducibility
//!
//! Runs are split into fixed blocks of [`RUN_BLOCK`] runs. Block `b` draws
//! from stream `b` of [`PathRng::stream_seeds`](crate::rng::PathRng::stream_seeds),
//! and block statistics are merged in block order, so a given seed yields
//! the same price on any number of threads.

use asian_core::math::probability::RiskNeutralProbability;
use asian_core::types::{BinomialModel, DiscountConvention, ModelError};
use rayon::prelude::*;
use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::paths::{checked_outcome, mirrored_outcome_from_draws, outcome_from_draws};
use super::stats::RunStats;
use crate::rng::PathRng;

/// Runs per independently seeded block.
pub const RUN_BLOCK: usize = 8192;

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::PricingResult;
/// use asian_core::types::DiscountConvention;
///
/// let result = PricingResult {
///     price: 14.4,
///     std_error: 0.05,
///     n_samples: 100_000,
///     n_paths: 100_000,
///     seed: 42,
///     discount: DiscountConvention::Continuous,
/// };
///
/// println!("Price: {:.2} +/- {:.2}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Discounted sample mean of payoffs.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of independent samples (runs).
    pub n_samples: u64,
    /// Number of simulated paths (twice the runs with antithetic pairs).
    pub n_paths: u64,
    /// Seed the estimate was produced with.
    pub seed: u64,
    /// Discounting convention applied.
    pub discount: DiscountConvention,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo estimator of the binomial Asian call.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::BinomialModel;
/// use asian_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_runs(20_000)
///     .n_periods(4)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(config).unwrap();
/// let result = pricer.price(&BinomialModel::default()).unwrap();
/// assert!(result.price > 0.0);
/// assert_eq!(result.seed, 42);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    seed: u64,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// Without a configured seed, a fresh entropy seed is drawn once here
    /// and reused by every [`price`](Self::price) call.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed().unwrap_or_else(PathRng::entropy_seed);
        Ok(Self { config, seed })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the master seed in use.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Prices the average-price call under `model`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an invalid model
    /// - `InvalidModel` when the risk-neutral probability leaves [0, 1]
    /// - `NumericOverflow` when path prices or the estimate are not finite
    pub fn price(&self, model: &BinomialModel) -> Result<PricingResult, ModelError> {
        model.validate()?;
        let probs = RiskNeutralProbability::from_model(model)?;
        let n_periods = self.config.n_periods();

        let n_runs = self.config.n_runs();
        let n_blocks = n_runs.div_ceil(RUN_BLOCK);
        let seeds = PathRng::stream_seeds(self.seed, n_blocks);
        let antithetic = self.config.antithetic();

        debug!(
            n_runs,
            n_periods,
            n_blocks,
            antithetic,
            seed = self.seed,
            up_probability = probs.up(),
            "Starting Monte Carlo simulation"
        );

        let block_stats = seeds
            .par_iter()
            .enumerate()
            .map(|(block, &block_seed)| {
                let start = block * RUN_BLOCK;
                let runs = RUN_BLOCK.min(n_runs - start);
                simulate_block(model, &probs, n_periods, runs, antithetic, block_seed)
            })
            .collect::<Result<Vec<RunStats>, ModelError>>()?;

        let stats = block_stats
            .into_iter()
            .fold(RunStats::new(), RunStats::merge);

        let discount = self.config.discount();
        let factor = discount.factor(model.rate, n_periods);
        let price = factor * stats.mean();
        let std_error = factor * stats.std_error();

        if !price.is_finite() || !std_error.is_finite() {
            return Err(ModelError::overflow(format!(
                "Monte Carlo estimate is not finite (price={}, std_error={})",
                price, std_error
            )));
        }

        let n_samples = stats.count();
        let n_paths = if antithetic { 2 * n_samples } else { n_samples };
        debug!(price, std_error, n_samples, "Monte Carlo simulation complete");

        Ok(PricingResult {
            price,
            std_error,
            n_samples,
            n_paths,
            seed: self.seed,
            discount,
        })
    }
}

fn simulate_block(
    model: &BinomialModel,
    probs: &RiskNeutralProbability,
    n_periods: usize,
    runs: usize,
    antithetic: bool,
    seed: u64,
) -> Result<RunStats, ModelError> {
    let mut rng = PathRng::from_seed(seed);
    let mut draws = vec![0.0; n_periods];
    let mut stats = RunStats::new();

    for _ in 0..runs {
        rng.fill_uniform(&mut draws);
        let outcome = outcome_from_draws(model, probs, &draws);
        let payoff = checked_outcome(outcome, n_periods)?.payoff;
        let sample = if antithetic {
            let mirror = mirrored_outcome_from_draws(model, probs, &draws);
            0.5 * (payoff + checked_outcome(mirror, n_periods)?.payoff)
        } else {
            payoff
        };
        stats.push(sample);
    }

    Ok(stats)
}
