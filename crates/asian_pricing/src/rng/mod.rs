//! # Random Number Generation Infrastructure
//!
//! Seeded uniform draws for the Monte Carlo estimator.
//!
//! - **Reproducibility**: every generator is created from a `u64` seed, and
//!   the seed is retained for reporting
//! - **Injectability**: [`PathRng`] implements `rand::RngCore`, so any code
//!   written against `rand::Rng` accepts it, and tests can pass their own
//!   generators instead
//! - **Parallel streams**: [`PathRng::stream_seeds`] expands one master seed
//!   into independent per-block seeds
//!
//! ## Usage Example
//!
//! ```rust
//! use asian_pricing::rng::PathRng;
//!
//! let mut rng = PathRng::from_seed(12345);
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let seeds = PathRng::stream_seeds(12345, 4);
//! assert_eq!(seeds.len(), 4);
//! ```

mod prng;

pub use prng::PathRng;
