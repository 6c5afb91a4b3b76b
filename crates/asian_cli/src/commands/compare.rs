//! Compare command implementation
//!
//! Runs both engines on the same tree under one discounting convention and
//! reports how far the estimate lands from the exact value.

use asian_core::types::DiscountConvention;
use asian_pricing::mc::{MonteCarloConfig, MonteCarloPricer, PricingResult};
use asian_pricing::tree::PathEnumerator;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Gap (in standard errors) above which the estimate is reported as suspect
const GAP_WARNING: f64 = 3.0;

/// Exact and estimated prices under a matched convention
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Convention applied to both engines
    pub discount: DiscountConvention,
    /// Path enumeration price
    pub exact: f64,
    /// Monte Carlo estimate
    pub estimate: PricingResult,
}

impl Comparison {
    /// Estimate minus exact price
    pub fn difference(&self) -> f64 {
        self.estimate.price - self.exact
    }

    /// Absolute difference in units of the estimate's standard error
    pub fn gap_in_std_errors(&self) -> f64 {
        let diff = self.difference().abs();
        if self.estimate.std_error > 0.0 {
            diff / self.estimate.std_error
        } else if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    }
}

/// Price with both engines using the enumeration depth and convention
pub fn compare(config: &CliConfig) -> Result<Comparison> {
    config.validate_enumeration()?;
    config.validate_runs()?;
    let steps = config.enumeration.steps;
    let discount = config.enumeration.discount;
    if steps == 0 {
        return Err(CliError::InvalidArgument(
            "compare needs at least one step to simulate".to_string(),
        ));
    }

    let exact = PathEnumerator::new(config.model, steps)?
        .with_discount(discount)
        .price()?;

    let settings = &config.simulation;
    let mc_config = MonteCarloConfig::builder()
        .n_runs(settings.runs)
        .n_periods(steps)
        .discount(discount)
        .antithetic(settings.antithetic)
        .maybe_seed(settings.seed)
        .build()?;
    let estimate = MonteCarloPricer::new(mc_config)?.price(&config.model)?;

    Ok(Comparison {
        discount,
        exact,
        estimate,
    })
}

/// Run the compare command
pub fn run(config: &CliConfig) -> Result<()> {
    let comparison = compare(config)?;
    let gap = comparison.gap_in_std_errors();

    println!("Discounting: {}", comparison.discount);
    println!("Binomial Tree Asian Option Price: {:.2}", comparison.exact);
    println!(
        "Monte Carlo Asian Option Price: {:.2} (+/- {:.2} at 95%)",
        comparison.estimate.price,
        comparison.estimate.confidence_95()
    );
    println!(
        "Difference: {:.4} ({:.2} std errors)",
        comparison.difference(),
        gap
    );

    if gap > GAP_WARNING {
        warn!(
            gap,
            seed = comparison.estimate.seed,
            "Estimate far from exact price"
        );
    }
    info!("Comparison complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(runs: usize) -> CliConfig {
        let mut config = CliConfig::default();
        config.simulation.runs = runs;
        config.simulation.seed = Some(7);
        config
    }

    #[test]
    fn test_matched_convention_agreement() {
        let comparison = compare(&seeded(100_000)).unwrap();
        assert_eq!(comparison.discount, DiscountConvention::Discrete);
        assert_eq!(comparison.estimate.discount, DiscountConvention::Discrete);
        assert!((comparison.exact - 14.461_645_754_598_141).abs() < 1e-9);
        assert!(comparison.gap_in_std_errors() < 4.5);
    }

    #[test]
    fn test_periods_follow_steps() {
        let mut config = seeded(1000);
        config.enumeration.steps = 6;
        config.simulation.periods = 2;
        let comparison = compare(&config).unwrap();
        let exact = PathEnumerator::new(config.model, 6).unwrap().price().unwrap();
        assert_eq!(comparison.exact, exact);
    }

    #[test]
    fn test_simulated_periods_setting_ignored() {
        let mut config = seeded(1000);
        config.simulation.periods = 0;
        assert!(compare(&config).is_ok());

        config.simulation.runs = 0;
        assert!(matches!(compare(&config), Err(CliError::Config(_))));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut config = seeded(1000);
        config.enumeration.steps = 0;
        assert!(matches!(compare(&config), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_gap_with_zero_error() {
        let mut config = seeded(100);
        config.model.up = 0.0;
        config.model.down = 0.0;
        config.model.strike = 90.0;
        let comparison = compare(&config).unwrap();
        assert_eq!(comparison.estimate.std_error, 0.0);
        assert!(comparison.difference().abs() < 1e-12);
    }
}
