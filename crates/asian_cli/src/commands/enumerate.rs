//! Enumerate command implementation
//!
//! Prices the option exactly by walking every path of the tree.

use asian_pricing::tree::PathEnumerator;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Exact price under the configured model and enumeration settings
pub fn price(config: &CliConfig) -> Result<f64> {
    config.validate_enumeration()?;
    let settings = &config.enumeration;
    let enumerator =
        PathEnumerator::new(config.model, settings.steps)?.with_discount(settings.discount);

    info!(
        steps = settings.steps,
        paths = enumerator.n_paths(),
        discount = %settings.discount,
        up_probability = enumerator.probabilities().up(),
        "Enumerating binomial tree"
    );

    Ok(enumerator.price()?)
}

/// Run the enumerate command
pub fn run(config: &CliConfig) -> Result<()> {
    let price = price(config)?;
    println!("Binomial Tree Asian Option Price: {:.2}", price);
    info!("Enumeration complete");
    Ok(())
}
