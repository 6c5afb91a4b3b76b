//! Arithmetic-average path outcomes and the Asian call payoff.
//!
//! A price path `S_0, S_1, ..., S_n` starts at the spot and multiplies by a
//! gross factor each step. Both engines feed moves into a
//! [`PathAccumulator`] so that no path is ever materialised:
//!
//! ```text
//! A = (1 / (n + 1)) Σ_{i=0..n} S_i
//! payoff = max(A - K, 0)
//! ```

use num_traits::Float;

/// Average-price call payoff `max(A - K, 0)`.
#[inline]
pub fn asian_call_payoff<T: Float>(average_price: T, strike: T) -> T {
    (average_price - strike).max(T::zero())
}

/// Arithmetic mean of a non-empty price path.
///
/// Returns `None` for an empty slice.
pub fn arithmetic_average<T: Float>(path: &[T]) -> Option<T> {
    if path.is_empty() {
        return None;
    }
    let (sum, count) = path
        .iter()
        .fold((T::zero(), T::zero()), |(sum, count), &price| {
            (sum + price, count + T::one())
        });
    Some(sum / count)
}

/// Average and payoff extracted from one price path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOutcome<T: Float> {
    /// Arithmetic mean of the `n + 1` path prices.
    pub average_price: T,
    /// `max(average_price - strike, 0)`.
    pub payoff: T,
}

impl<T: Float> PathOutcome<T> {
    /// Builds the outcome from an average price.
    #[inline]
    pub fn from_average(average_price: T, strike: T) -> Self {
        Self {
            average_price,
            payoff: asian_call_payoff(average_price, strike),
        }
    }

    /// Builds the outcome from a materialised path (spot first).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asian_core::math::payoff::PathOutcome;
    ///
    /// let outcome = PathOutcome::from_path(&[100.0_f64, 120.0, 84.0], 95.0).unwrap();
    /// assert!((outcome.average_price - 101.333_333_333_333_33).abs() < 1e-9);
    /// assert!((outcome.payoff - 6.333_333_333_333_33).abs() < 1e-9);
    /// ```
    pub fn from_path(path: &[T], strike: T) -> Option<Self> {
        arithmetic_average(path).map(|avg| Self::from_average(avg, strike))
    }

    /// True when both fields are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.average_price.is_finite() && self.payoff.is_finite()
    }
}

/// Running price, sum and count of a path under construction.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::payoff::PathAccumulator;
///
/// let mut acc = PathAccumulator::new(100.0_f64);
/// acc.step(1.2);
/// acc.step(0.7);
///
/// assert!((acc.price() - 84.0).abs() < 1e-12);
/// let outcome = acc.outcome(100.0);
/// assert!((outcome.payoff - 4.0 / 3.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PathAccumulator<T: Float> {
    price: T,
    sum: T,
    count: T,
}

impl<T: Float> PathAccumulator<T> {
    /// Starts a path at `spot`.
    #[inline]
    pub fn new(spot: T) -> Self {
        Self {
            price: spot,
            sum: spot,
            count: T::one(),
        }
    }

    /// Applies one gross move and records the new price.
    #[inline]
    pub fn step(&mut self, factor: T) {
        self.price = self.price * factor;
        self.sum = self.sum + self.price;
        self.count = self.count + T::one();
    }

    /// Current (latest) price.
    #[inline]
    pub fn price(&self) -> T {
        self.price
    }

    /// Arithmetic mean of all recorded prices.
    #[inline]
    pub fn average(&self) -> T {
        self.sum / self.count
    }

    /// Average and payoff of the recorded path.
    #[inline]
    pub fn outcome(&self, strike: T) -> PathOutcome<T> {
        PathOutcome::from_average(self.average(), strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_call_payoff_floor() {
        assert_eq!(asian_call_payoff(90.0_f64, 100.0), 0.0);
        assert_eq!(asian_call_payoff(100.0_f64, 100.0), 0.0);
        assert_relative_eq!(asian_call_payoff(112.5_f64, 100.0), 12.5);
    }

    #[test]
    fn test_arithmetic_average() {
        assert_eq!(arithmetic_average::<f64>(&[]), None);
        assert_eq!(arithmetic_average(&[42.0_f64]), Some(42.0));
        assert_relative_eq!(
            arithmetic_average(&[100.0_f64, 120.0, 144.0]).unwrap(),
            364.0 / 3.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_accumulator_matches_materialised_path() {
        let factors = [1.2, 0.7, 1.2, 1.2, 0.7];
        let mut acc = PathAccumulator::new(100.0_f64);
        let mut path = vec![100.0_f64];
        for &f in &factors {
            acc.step(f);
            path.push(path[path.len() - 1] * f);
        }

        let from_acc = acc.outcome(95.0);
        let from_path = PathOutcome::from_path(&path, 95.0).unwrap();
        assert_relative_eq!(
            from_acc.average_price,
            from_path.average_price,
            epsilon = 1e-12
        );
        assert_relative_eq!(from_acc.payoff, from_path.payoff, epsilon = 1e-12);
        assert_relative_eq!(acc.price(), path[path.len() - 1], epsilon = 1e-12);
    }

    #[test]
    fn test_move_order_changes_average() {
        // Same number of ups, different order -> different average
        let mut up_first = PathAccumulator::new(100.0_f64);
        up_first.step(1.2);
        up_first.step(0.7);

        let mut down_first = PathAccumulator::new(100.0_f64);
        down_first.step(0.7);
        down_first.step(1.2);

        assert_relative_eq!(up_first.price(), down_first.price(), epsilon = 1e-12);
        assert!(up_first.average() > down_first.average());
    }

    #[test]
    fn test_trivial_path() {
        let acc = PathAccumulator::new(105.0_f64);
        let outcome = acc.outcome(100.0);
        assert_eq!(outcome.average_price, 105.0);
        assert_eq!(outcome.payoff, 5.0);
        assert!(outcome.is_finite());
    }

    #[test]
    fn test_generic_over_f32() {
        let mut acc = PathAccumulator::new(10.0_f32);
        acc.step(2.0);
        assert_eq!(acc.average(), 15.0);
    }
}
