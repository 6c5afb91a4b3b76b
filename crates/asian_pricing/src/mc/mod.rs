//! Monte Carlo estimator of the binomial Asian call.
//!
//! Paths are drawn directly under the risk-neutral measure (no
//! re-weighting): each period a uniform draw above `Pd` moves the price up,
//! otherwise down. The price is the discounted sample mean of payoffs.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (runs, periods, seed, discounting, antithetic)
//! ├── PathRng streams   (one per block of runs)
//! ├── paths             (draws -> PathOutcome)
//! └── RunStats          (per-block statistics, merged in order)
//! ```
//!
//! [`simulate_price_with_rng`] is the single-threaded form over any
//! `rand::Rng`.
//!
//! # Discounting
//!
//! The default is continuous (`exp(-r · n_periods)`), unlike the exact
//! enumerator's discrete default. Set
//! [`DiscountConvention::Discrete`](asian_core::types::DiscountConvention)
//! to compare the two engines under one convention.
//!
//! # Examples
//!
//! ```rust
//! use asian_core::types::{BinomialModel, DiscountConvention};
//! use asian_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_runs(50_000)
//!     .n_periods(4)
//!     .discount(DiscountConvention::Discrete)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = MonteCarloPricer::new(config)
//!     .unwrap()
//!     .price(&BinomialModel::default())
//!     .unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod pricer;
pub mod simulate;
pub mod stats;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_PERIODS, MAX_RUNS};
pub use error::ConfigError;
pub use paths::Move;
pub use pricer::{MonteCarloPricer, PricingResult, RUN_BLOCK};
pub use simulate::simulate_price_with_rng;
pub use stats::RunStats;
