//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for the
//! binomial Asian Monte Carlo estimator.

use asian_core::types::DiscountConvention;

use super::error::ConfigError;

/// Maximum number of simulated runs allowed.
pub const MAX_RUNS: usize = 10_000_000;

/// Maximum number of periods allowed per path.
pub const MAX_PERIODS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Defaults
///
/// - discounting: [`DiscountConvention::Continuous`] (`exp(-r n)`)
/// - antithetic variates: off
/// - seed: none (a fresh entropy seed is drawn per pricer)
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::MonteCarloConfig;
/// use asian_core::types::DiscountConvention;
///
/// let config = MonteCarloConfig::builder()
///     .n_runs(10_000)
///     .n_periods(4)
///     .discount(DiscountConvention::Discrete)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_runs(), 10_000);
/// assert_eq!(config.n_periods(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of independent runs (samples).
    n_runs: usize,
    /// Number of binomial periods per path.
    n_periods: usize,
    /// Present-value convention.
    discount: DiscountConvention,
    /// Simulate a mirrored path per run and average the pair.
    antithetic: bool,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of runs.
    #[inline]
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// Returns the number of periods per path.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Returns the discounting convention.
    #[inline]
    pub fn discount(&self) -> DiscountConvention {
        self.discount
    }

    /// Returns whether antithetic pairs are simulated.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_runs` is 0 or greater than 10,000,000
    /// - `n_periods` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.n_runs, self.n_periods)
    }
}

/// Range checks shared by the config and the single-threaded entry point.
pub(crate) fn validate_counts(n_runs: usize, n_periods: usize) -> Result<(), ConfigError> {
    if n_runs == 0 || n_runs > MAX_RUNS {
        return Err(ConfigError::InvalidRunCount(n_runs));
    }
    if n_periods == 0 || n_periods > MAX_PERIODS {
        return Err(ConfigError::InvalidPeriodCount(n_periods));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use asian_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_runs(50_000)
///     .n_periods(12)
///     .antithetic(true)
///     .seed(12345)
///     .build()
///     .expect("valid config");
/// assert!(config.antithetic());
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_runs: Option<usize>,
    n_periods: Option<usize>,
    discount: DiscountConvention,
    antithetic: bool,
    seed: Option<u64>,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_runs: None,
            n_periods: None,
            discount: DiscountConvention::Continuous,
            antithetic: false,
            seed: None,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of runs, in [1, 10_000_000].
    #[inline]
    pub fn n_runs(mut self, n_runs: usize) -> Self {
        self.n_runs = Some(n_runs);
        self
    }

    /// Sets the number of periods per path, in [1, 10_000].
    #[inline]
    pub fn n_periods(mut self, n_periods: usize) -> Self {
        self.n_periods = Some(n_periods);
        self
    }

    /// Sets the discounting convention.
    #[inline]
    pub fn discount(mut self, discount: DiscountConvention) -> Self {
        self.discount = discount;
        self
    }

    /// Enables or disables antithetic pairs.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_runs` not set or invalid
    /// - `n_periods` not set or invalid
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_runs = self.n_runs.ok_or(ConfigError::InvalidParameter {
            name: "n_runs",
            value: "must be specified".to_string(),
        })?;

        let n_periods = self.n_periods.ok_or(ConfigError::InvalidParameter {
            name: "n_periods",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_runs,
            n_periods,
            discount: self.discount,
            antithetic: self.antithetic,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
