//! Risk-neutral probability of the multiplicative binomial tree.
//!
//! Under the measure `(Pu, Pd)` the discounted asset price is a martingale:
//!
//! ```text
//! Pu = (R - D) / (U - D),   Pd = 1 - Pu
//! U = 1 + up,  D = 1 + down,  R = 1 + r
//! ```
//!
//! [`derive_probabilities`] is the raw formula and performs no validation.
//! [`RiskNeutralProbability::derive`] enforces `Pu ∈ [0, 1]`.

use crate::types::{BinomialModel, ModelError};

/// Raw risk-neutral probabilities `(Pu, Pd)`.
///
/// No bound checking: when `D < R < U` fails the result is not a
/// probability, yet `Pu + Pd == 1` still holds. Callers must treat
/// `Pu ∉ [0, 1]` as an invalid model.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::probability::derive_probabilities;
///
/// let (pu, pd) = derive_probabilities(0.2, -0.3, 0.05);
/// assert!((pu - 0.7).abs() < 1e-12);
/// assert!((pd - 0.3).abs() < 1e-12);
///
/// // Arbitrage: R above U
/// let (pu, _) = derive_probabilities(0.2, -0.3, 0.45);
/// assert!(pu > 1.0);
/// ```
#[inline]
pub fn derive_probabilities(up: f64, down: f64, rate: f64) -> (f64, f64) {
    let gross_up = 1.0 + up;
    let gross_down = 1.0 + down;
    let gross_rate = 1.0 + rate;
    let pu = (gross_rate - gross_down) / (gross_up - gross_down);
    (pu, 1.0 - pu)
}

/// Validated risk-neutral measure, shared read-only by all paths of a
/// pricing call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskNeutralProbability {
    up: f64,
    down: f64,
}

impl RiskNeutralProbability {
    /// Probability assigned to each branch when `up == down`.
    ///
    /// Both branches produce the same price, so any split yields the same
    /// option value.
    pub const FLAT_TREE: f64 = 0.5;

    /// Derives and validates the measure.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when `down > up`
    /// - `InvalidModel` when `Pu` is outside `[0, 1]` or not finite
    pub fn derive(up: f64, down: f64, rate: f64) -> Result<Self, ModelError> {
        if down > up {
            return Err(ModelError::invalid_parameter(
                "down",
                format!("must not exceed up ({}), got {}", up, down),
            ));
        }
        if up == down {
            return Ok(Self::flat());
        }

        let (pu, pd) = derive_probabilities(up, down, rate);
        if !pu.is_finite() || !(0.0..=1.0).contains(&pu) {
            return Err(ModelError::InvalidModel { up_probability: pu });
        }
        Ok(Self { up: pu, down: pd })
    }

    /// Derives the measure for a validated model.
    pub fn from_model(model: &BinomialModel) -> Result<Self, ModelError> {
        if model.is_flat() {
            return Ok(Self::flat());
        }
        Self::derive(model.up, model.down, model.rate)
    }

    #[inline]
    fn flat() -> Self {
        Self {
            up: Self::FLAT_TREE,
            down: 1.0 - Self::FLAT_TREE,
        }
    }

    /// Up-move probability `Pu`.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down-move probability `Pd = 1 - Pu`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Probability mass of one specific path with `n_ups` up moves out of
    /// `n_steps`: `Pu^n_ups · Pd^(n_steps - n_ups)`.
    #[inline]
    pub fn path_mass(&self, n_ups: u32, n_steps: u32) -> f64 {
        debug_assert!(n_ups <= n_steps);
        self.up.powi(n_ups as i32) * self.down.powi((n_steps - n_ups) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_probabilities() {
        let probs = RiskNeutralProbability::derive(0.2, -0.3, 0.05).unwrap();
        assert_relative_eq!(probs.up(), 0.7, epsilon = 1e-12);
        assert_relative_eq!(probs.down(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_martingale_property() {
        // Pu·U + Pd·D == R
        let probs = RiskNeutralProbability::derive(0.1, -0.05, 0.02).unwrap();
        let expected_growth = probs.up() * 1.1 + probs.down() * 0.95;
        assert_relative_eq!(expected_growth, 1.02, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_up_probability_above_one() {
        // U=1.2, D=0.7, R=1.45 -> Pu = 1.5
        let err = RiskNeutralProbability::derive(0.2, -0.3, 0.45).unwrap_err();
        match err {
            ModelError::InvalidModel { up_probability } => {
                assert_relative_eq!(up_probability, 1.5, epsilon = 1e-12)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_up_probability() {
        // U=1.2, D=0.7, R=0.6 -> Pu = -0.2
        let err = RiskNeutralProbability::derive(0.2, -0.3, -0.4).unwrap_err();
        match err {
            ModelError::InvalidModel { up_probability } => {
                assert_relative_eq!(up_probability, -0.2, epsilon = 1e-12)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_boundary_probabilities_accepted() {
        // R == D -> Pu = 0
        let probs = RiskNeutralProbability::derive(0.2, 0.05, 0.05).unwrap();
        assert_eq!(probs.up(), 0.0);
        // R == U -> Pu = 1
        let probs = RiskNeutralProbability::derive(0.05, -0.3, 0.05).unwrap();
        assert_relative_eq!(probs.up(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_flat_tree() {
        let probs = RiskNeutralProbability::derive(0.0, 0.0, 0.05).unwrap();
        assert_eq!(probs.up(), 0.5);
        assert_eq!(probs.down(), 0.5);
    }

    #[test]
    fn test_flat_model_ignores_rate() {
        // A flat tree away from R would be an arbitrage under the raw formula
        let model = BinomialModel::new(100.0, 95.0, 0.3, 0.1, 0.1).unwrap();
        assert!(model.is_flat());
        let probs = RiskNeutralProbability::from_model(&model).unwrap();
        assert_eq!(probs.up(), RiskNeutralProbability::FLAT_TREE);
        assert_eq!(probs.down(), 0.5);
    }

    #[test]
    fn test_rejects_inverted_bracket() {
        let err = RiskNeutralProbability::derive(-0.3, 0.2, 0.05).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "down", .. }));
    }

    #[test]
    fn test_path_mass() {
        let probs = RiskNeutralProbability::derive(0.2, -0.3, 0.05).unwrap();
        assert_relative_eq!(probs.path_mass(3, 4), 0.7_f64.powi(3) * 0.3, epsilon = 1e-15);
        assert_eq!(probs.path_mass(0, 0), 1.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The two masses always sum to one, valid or not.
        #[test]
        fn prop_probabilities_sum_to_one(
            up in 0.001f64..2.0,
            down in -0.99f64..-0.001,
            rate in -0.5f64..1.0,
        ) {
            let (pu, pd) = derive_probabilities(up, down, rate);
            prop_assert!((pu + pd - 1.0).abs() < 1e-9);
        }

        /// Whenever D < R < U the validated measure exists and lies in [0, 1].
        #[test]
        fn prop_bracketed_rate_is_valid(
            up in 0.001f64..2.0,
            down in -0.99f64..-0.001,
            t in 0.01f64..0.99,
        ) {
            let rate = down + t * (up - down);
            let probs = RiskNeutralProbability::derive(up, down, rate).unwrap();
            prop_assert!((0.0..=1.0).contains(&probs.up()));
            prop_assert!((probs.up() + probs.down() - 1.0).abs() < 1e-9);
        }
    }
}
