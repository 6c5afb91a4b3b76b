//! Present-value conventions for the per-period risk-free rate.
//!
//! The exact enumerator and the Monte Carlo estimator historically discount
//! differently; both conventions are kept selectable so the two engines can
//! be compared under a matched convention.

use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

/// How an expected payoff `n` periods ahead is brought to present value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiscountConvention {
    /// Divide by `(1 + r)^n`.
    Discrete,
    /// Multiply by `exp(-r n)`.
    Continuous,
}

impl DiscountConvention {
    /// Discount factor for `periods` periods at per-period `rate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asian_core::types::DiscountConvention;
    ///
    /// let df = DiscountConvention::Discrete.factor(0.05, 4);
    /// assert!((df - 1.0 / 1.05_f64.powi(4)).abs() < 1e-15);
    ///
    /// let df = DiscountConvention::Continuous.factor(0.05, 4);
    /// assert!((df - (-0.2_f64).exp()).abs() < 1e-15);
    /// ```
    #[inline]
    pub fn factor(self, rate: f64, periods: usize) -> f64 {
        match self {
            DiscountConvention::Discrete => {
                let periods = periods.min(i32::MAX as usize) as i32;
                (1.0 + rate).powi(periods).recip()
            }
            DiscountConvention::Continuous => (-rate * periods as f64).exp(),
        }
    }

    /// Lower-case name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountConvention::Discrete => "discrete",
            DiscountConvention::Continuous => "continuous",
        }
    }
}

impl fmt::Display for DiscountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountConvention {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discrete" | "compound" => Ok(DiscountConvention::Discrete),
            "continuous" | "exp" => Ok(DiscountConvention::Continuous),
            other => Err(ModelError::invalid_parameter(
                "discount",
                format!("unknown convention '{}', expected discrete or continuous", other),
            )),
        }
    }
}
