//! Multiplicative binomial model parameters.

use super::error::ModelError;

/// Parameters of a single-asset multiplicative binomial tree.
///
/// Each period the asset price is multiplied by `U = 1 + up` or
/// `D = 1 + down`; the riskless asset grows by `R = 1 + rate`.
///
/// Fields are public so the struct can be filled from configuration;
/// pricing entry points call [`validate`](Self::validate) before use.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::BinomialModel;
///
/// let model = BinomialModel::new(100.0, 100.0, 0.05, 0.2, -0.3).unwrap();
/// assert!((model.gross_up() - 1.2).abs() < 1e-15);
/// assert!((model.gross_down() - 0.7).abs() < 1e-15);
///
/// assert!(BinomialModel::new(-1.0, 100.0, 0.05, 0.2, -0.3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BinomialModel {
    /// Initial asset price `S`.
    pub spot: f64,
    /// Strike `K` of the average-price call.
    pub strike: f64,
    /// Per-period risk-free rate `r`.
    pub rate: f64,
    /// Per-period up rate (`U = 1 + up`).
    pub up: f64,
    /// Per-period down rate (`D = 1 + down`).
    pub down: f64,
}

impl Default for BinomialModel {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            up: 0.2,
            down: -0.3,
        }
    }
}

impl BinomialModel {
    /// Creates a validated model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidParameter` if any constraint of
    /// [`validate`](Self::validate) is violated.
    pub fn new(spot: f64, strike: f64, rate: f64, up: f64, down: f64) -> Result<Self, ModelError> {
        let model = Self {
            spot,
            strike,
            rate,
            up,
            down,
        };
        model.validate()?;
        Ok(model)
    }

    /// Checks the parameter domains.
    ///
    /// - every field finite
    /// - `spot > 0`, `strike >= 0`
    /// - `rate > -1`, `up > -1`, `down > -1` (positive gross factors)
    /// - `down <= up` (`down == up` is a degenerate, flat tree)
    ///
    /// The no-arbitrage bound on the derived probability is checked
    /// separately by
    /// [`RiskNeutralProbability::derive`](crate::math::probability::RiskNeutralProbability::derive).
    pub fn validate(&self) -> Result<(), ModelError> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("rate", self.rate),
            ("up", self.up),
            ("down", self.down),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ModelError::invalid_parameter(
                    name,
                    format!("must be finite, got {}", value),
                ));
            }
        }

        if self.spot <= 0.0 {
            return Err(ModelError::invalid_parameter(
                "spot",
                format!("must be positive, got {}", self.spot),
            ));
        }
        if self.strike < 0.0 {
            return Err(ModelError::invalid_parameter(
                "strike",
                format!("must be non-negative, got {}", self.strike),
            ));
        }
        for (name, value) in [("rate", self.rate), ("up", self.up), ("down", self.down)] {
            if value <= -1.0 {
                return Err(ModelError::invalid_parameter(
                    name,
                    format!("must be greater than -1, got {}", value),
                ));
            }
        }
        if self.down > self.up {
            return Err(ModelError::invalid_parameter(
                "down",
                format!("must not exceed up ({}), got {}", self.up, self.down),
            ));
        }

        Ok(())
    }

    /// Gross up factor `U = 1 + up`.
    #[inline]
    pub fn gross_up(&self) -> f64 {
        1.0 + self.up
    }

    /// Gross down factor `D = 1 + down`.
    #[inline]
    pub fn gross_down(&self) -> f64 {
        1.0 + self.down
    }

    /// Gross riskless return `R = 1 + rate`.
    #[inline]
    pub fn gross_rate(&self) -> f64 {
        1.0 + self.rate
    }

    /// Returns true when up and down moves coincide.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.up == self.down
    }

    /// Largest price any path of `n_steps` moves can reach.
    ///
    /// Used as an overflow pre-flight before enumeration, which visits the
    /// all-up and all-down paths.
    pub fn max_path_price(&self, n_steps: usize) -> f64 {
        let factor = self.gross_up().max(self.gross_down()).max(1.0);
        self.spot * factor.powi(n_steps.min(i32::MAX as usize) as i32)
    }

    /// Fails with `NumericOverflow` when a path of `n_steps` moves could
    /// leave the finite `f64` range.
    pub fn check_overflow(&self, n_steps: usize) -> Result<(), ModelError> {
        let max_price = self.max_path_price(n_steps);
        // The average sums n_steps + 1 prices before dividing.
        if !max_price.is_finite() || !(max_price * (n_steps as f64 + 1.0)).is_finite() {
            return Err(ModelError::overflow(format!(
                "path prices exceed f64 range after {} steps (S={}, U={}, D={})",
                n_steps,
                self.spot,
                self.gross_up(),
                self.gross_down()
            )));
        }
        Ok(())
    }
}
