//! Simulate command implementation
//!
//! Estimates the option price by Monte Carlo under the risk-neutral measure.

use asian_pricing::mc::{MonteCarloConfig, MonteCarloPricer, PricingResult};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Monte Carlo estimate under the configured model and simulation settings
pub fn estimate(config: &CliConfig) -> Result<PricingResult> {
    config.validate_simulation()?;
    let settings = &config.simulation;
    let mc_config = MonteCarloConfig::builder()
        .n_runs(settings.runs)
        .n_periods(settings.periods)
        .discount(settings.discount)
        .antithetic(settings.antithetic)
        .maybe_seed(settings.seed)
        .build()?;

    let pricer = MonteCarloPricer::new(mc_config)?;
    info!(
        runs = settings.runs,
        periods = settings.periods,
        discount = %settings.discount,
        antithetic = settings.antithetic,
        seed = pricer.seed(),
        "Running Monte Carlo simulation"
    );

    Ok(pricer.price(&config.model)?)
}

/// Run the simulate command
pub fn run(config: &CliConfig) -> Result<()> {
    let result = estimate(config)?;
    println!("Monte Carlo Asian Option Price: {:.2}", result.price);
    info!(
        std_error = result.std_error,
        ci95 = result.confidence_95(),
        paths = result.n_paths,
        seed = result.seed,
        "Simulation complete"
    );
    Ok(())
}
