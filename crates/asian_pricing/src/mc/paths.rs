//! Binomial path generation from uniform draws.
//!
//! # Move Convention
//!
//! Each period consumes one uniform draw `u ∈ [0, 1)`:
//!
//! ```text
//! u >  Pd  ->  up   (S *= U)
//! u <= Pd  ->  down (S *= D)
//! ```
//!
//! so `P(up) = 1 - Pd = Pu`. The tie `u == Pd` goes down; it has measure
//! zero and only matters for reproducing a fixed draw sequence.

use asian_core::math::payoff::{PathAccumulator, PathOutcome};
use asian_core::math::probability::RiskNeutralProbability;
use asian_core::types::{BinomialModel, ModelError};
use rand::Rng;

/// One period's move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Multiply by `U = 1 + up`.
    Up,
    /// Multiply by `D = 1 + down`.
    Down,
}

impl Move {
    /// Maps a uniform draw to a move: `draw > Pd` is up.
    #[inline]
    pub fn from_draw(draw: f64, down_probability: f64) -> Self {
        if draw > down_probability {
            Move::Up
        } else {
            Move::Down
        }
    }
}

/// Builds one path from `draws` (one per period) and returns its outcome.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::probability::RiskNeutralProbability;
/// use asian_core::types::BinomialModel;
/// use asian_pricing::mc::paths::outcome_from_draws;
///
/// let model = BinomialModel::default(); // Pd = 0.3
/// let probs = RiskNeutralProbability::from_model(&model).unwrap();
///
/// // up, down -> 100, 120, 84
/// let outcome = outcome_from_draws(&model, &probs, &[0.9, 0.1]);
/// assert!((outcome.average_price - 304.0 / 3.0).abs() < 1e-9);
/// ```
pub fn outcome_from_draws(
    model: &BinomialModel,
    probs: &RiskNeutralProbability,
    draws: &[f64],
) -> PathOutcome<f64> {
    walk(model, probs, draws.iter().copied())
}

/// Outcome of the antithetic mirror path built from `1 - u` for each draw.
pub fn mirrored_outcome_from_draws(
    model: &BinomialModel,
    probs: &RiskNeutralProbability,
    draws: &[f64],
) -> PathOutcome<f64> {
    walk(model, probs, draws.iter().map(|&u| 1.0 - u))
}

/// Draws `n_periods` uniforms from `rng` one at a time and returns the
/// path outcome.
pub fn simulate_outcome<R: Rng + ?Sized>(
    model: &BinomialModel,
    probs: &RiskNeutralProbability,
    n_periods: usize,
    rng: &mut R,
) -> PathOutcome<f64> {
    walk(model, probs, (0..n_periods).map(|_| rng.gen::<f64>()))
}

/// Passes `outcome` through if its average and payoff are finite.
///
/// Path prices grow geometrically, so a long enough path can leave the
/// `f64` range even when the estimate itself would be representable.
pub fn checked_outcome(
    outcome: PathOutcome<f64>,
    n_periods: usize,
) -> Result<PathOutcome<f64>, ModelError> {
    if outcome.is_finite() {
        Ok(outcome)
    } else {
        Err(ModelError::overflow(format!(
            "path price left the f64 range within {} periods",
            n_periods
        )))
    }
}

#[inline]
fn walk<I>(model: &BinomialModel, probs: &RiskNeutralProbability, draws: I) -> PathOutcome<f64>
where
    I: Iterator<Item = f64>,
{
    let gross_up = model.gross_up();
    let gross_down = model.gross_down();
    let pd = probs.down();

    let mut acc = PathAccumulator::new(model.spot);
    for draw in draws {
        match Move::from_draw(draw, pd) {
            Move::Up => acc.step(gross_up),
            Move::Down => acc.step(gross_down),
        }
    }
    acc.outcome(model.strike)
}
