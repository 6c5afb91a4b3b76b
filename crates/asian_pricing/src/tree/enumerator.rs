//! Exact pricing by enumerating every binomial path.
//!
//! # Bit Order
//!
//! Path `i ∈ [0, 2^n)` reads the `n`-bit representation of `i` most
//! significant bit first: bit `n - 1 - j` is move `j`, `1` is up and `0` is
//! down. Index 0 is all-down, index `2^n - 1` all-up, and for `n = 2`
//! index `0b10` is up-then-down.
//!
//! The average depends on move order, so paths with the same number of ups
//! are evaluated individually rather than grouped by binomial coefficient.
//!
//! # Reduction Order
//!
//! Indices are split into blocks of [`ENUMERATION_BLOCK`] paths. Each block
//! sums in index order and block sums are added in block order, so results
//! are bit-identical for any thread count. With `2^n <= ENUMERATION_BLOCK`
//! this is a plain left-to-right sum.

use asian_core::math::payoff::{PathAccumulator, PathOutcome};
use asian_core::math::probability::RiskNeutralProbability;
use asian_core::types::{BinomialModel, DiscountConvention, ModelError};
use rayon::prelude::*;
use tracing::debug;

/// Largest supported step count (`2^30` paths).
pub const MAX_ENUMERATION_STEPS: usize = 30;

/// Paths per reduction block.
pub const ENUMERATION_BLOCK: u64 = 4096;

/// Exact expected discounted payoff over all `2^n_steps` paths.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::BinomialModel;
/// use asian_pricing::tree::PathEnumerator;
///
/// let enumerator = PathEnumerator::new(BinomialModel::default(), 4).unwrap();
/// assert_eq!(enumerator.n_paths(), 16);
///
/// let price = enumerator.price().unwrap();
/// assert!((price - 14.461_645_754_598_14).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct PathEnumerator {
    model: BinomialModel,
    probs: RiskNeutralProbability,
    n_steps: usize,
    discount: DiscountConvention,
}

impl PathEnumerator {
    /// Validates the model and step count and derives the measure.
    ///
    /// Discounting defaults to [`DiscountConvention::Discrete`].
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an invalid model or `n_steps > 30`
    /// - `InvalidModel` when the risk-neutral probability leaves [0, 1]
    /// - `NumericOverflow` when a path could leave the `f64` range
    pub fn new(model: BinomialModel, n_steps: usize) -> Result<Self, ModelError> {
        if n_steps > MAX_ENUMERATION_STEPS {
            return Err(ModelError::invalid_parameter(
                "n_steps",
                format!(
                    "{} exceeds the enumeration limit of {} (2^n paths)",
                    n_steps, MAX_ENUMERATION_STEPS
                ),
            ));
        }
        model.validate()?;
        let probs = RiskNeutralProbability::from_model(&model)?;
        model.check_overflow(n_steps)?;

        Ok(Self {
            model,
            probs,
            n_steps,
            discount: DiscountConvention::Discrete,
        })
    }

    /// Replaces the discounting convention.
    #[inline]
    pub fn with_discount(mut self, discount: DiscountConvention) -> Self {
        self.discount = discount;
        self
    }

    /// Number of steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of enumerated paths, `2^n_steps`.
    #[inline]
    pub fn n_paths(&self) -> u64 {
        1u64 << self.n_steps
    }

    /// Risk-neutral measure in use.
    #[inline]
    pub fn probabilities(&self) -> RiskNeutralProbability {
        self.probs
    }

    /// Discounting convention in use.
    #[inline]
    pub fn discount(&self) -> DiscountConvention {
        self.discount
    }

    /// Average and payoff of path `index`.
    pub fn path_outcome(&self, index: u64) -> PathOutcome<f64> {
        debug_assert!(index < self.n_paths());
        let gross_up = self.model.gross_up();
        let gross_down = self.model.gross_down();

        let mut acc = PathAccumulator::new(self.model.spot);
        for bit in (0..self.n_steps).rev() {
            if (index >> bit) & 1 == 1 {
                acc.step(gross_up);
            } else {
                acc.step(gross_down);
            }
        }
        acc.outcome(self.model.strike)
    }

    /// Risk-neutral mass of path `index`: `Pu^ups · Pd^downs`.
    #[inline]
    pub fn path_mass(&self, index: u64) -> f64 {
        self.probs.path_mass(index.count_ones(), self.n_steps as u32)
    }

    /// Sum of all path masses; `(Pu + Pd)^n = 1` up to rounding.
    pub fn total_probability(&self) -> f64 {
        self.reduce(|index| self.path_mass(index))
    }

    /// Undiscounted risk-neutral expectation of the payoff.
    pub fn expected_payoff(&self) -> Result<f64, ModelError> {
        let expected =
            self.reduce(|index| self.path_outcome(index).payoff * self.path_mass(index));
        if !expected.is_finite() {
            return Err(ModelError::overflow(format!(
                "expected payoff over {} paths is not finite",
                self.n_paths()
            )));
        }
        Ok(expected)
    }

    /// Discounted option price.
    pub fn price(&self) -> Result<f64, ModelError> {
        debug!(
            n_steps = self.n_steps,
            n_paths = self.n_paths(),
            up_probability = self.probs.up(),
            discount = %self.discount,
            "Enumerating binomial paths"
        );
        let expected = self.expected_payoff()?;
        let price = match self.discount {
            DiscountConvention::Discrete => {
                expected / self.model.gross_rate().powi(self.n_steps as i32)
            }
            DiscountConvention::Continuous => {
                expected * self.discount.factor(self.model.rate, self.n_steps)
            }
        };
        if !price.is_finite() {
            return Err(ModelError::overflow(format!(
                "discounted price is not finite ({})",
                price
            )));
        }
        Ok(price)
    }

    fn reduce<F>(&self, term: F) -> f64
    where
        F: Fn(u64) -> f64 + Sync,
    {
        let n_paths = self.n_paths();
        let block_sum = |block: u64| {
            let start = block * ENUMERATION_BLOCK;
            let end = (start + ENUMERATION_BLOCK).min(n_paths);
            (start..end).fold(0.0, |sum, index| sum + term(index))
        };

        let n_blocks = n_paths.div_ceil(ENUMERATION_BLOCK) as usize;
        if n_blocks == 1 {
            return block_sum(0);
        }

        let sums: Vec<f64> = (0..n_blocks)
            .into_par_iter()
            .map(|block| block_sum(block as u64))
            .collect();
        sums.into_iter().fold(0.0, |total, sum| total + sum)
    }
}
