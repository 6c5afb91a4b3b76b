//! Asian CLI - Binomial Asian Call Pricing
//!
//! Command line entry point for pricing an arithmetic-average call on a
//! multiplicative binomial tree.
//!
//! # Commands
//!
//! - `asian enumerate` - Exact price by enumerating every path
//! - `asian simulate` - Monte Carlo estimate under the risk-neutral measure
//! - `asian compare` - Both engines under one discounting convention
//!
//! # Configuration
//!
//! Settings resolve as CLI flags > environment (`ASIAN_LOG_LEVEL`,
//! `ASIAN_SEED`) > TOML file (`--config`) > defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use asian_core::types::DiscountConvention;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{build_config, CliArgs, CliConfig};
pub use error::{CliError, Result};

/// Binomial Asian Option Pricing CLI
#[derive(Parser, Debug)]
#[command(name = "asian")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging unless --log-level is given)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Initial asset price S
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Strike K
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Per-period risk-free rate r
    #[arg(long, global = true, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Per-period up rate (U = 1 + up)
    #[arg(long, global = true, allow_negative_numbers = true)]
    up: Option<f64>,

    /// Per-period down rate (D = 1 + down)
    #[arg(long, global = true, allow_negative_numbers = true)]
    down: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exact price by enumerating all 2^steps paths
    Enumerate {
        /// Tree depth (at most 30)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Discounting convention (discrete, continuous)
        #[arg(short, long)]
        discount: Option<DiscountConvention>,
    },

    /// Monte Carlo estimate
    Simulate {
        /// Periods per path
        #[arg(short, long)]
        periods: Option<usize>,

        /// Number of runs
        #[arg(short, long)]
        runs: Option<usize>,

        /// Master seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Discounting convention (discrete, continuous)
        #[arg(short, long)]
        discount: Option<DiscountConvention>,

        /// Average each run with its mirrored path
        #[arg(long)]
        antithetic: bool,
    },

    /// Run both engines on the same tree and report the gap
    Compare {
        /// Tree depth, also used as the simulated period count
        #[arg(short, long)]
        steps: Option<usize>,

        /// Number of Monte Carlo runs
        #[arg(short, long)]
        runs: Option<usize>,

        /// Master seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Discounting convention applied to both engines
        #[arg(short, long)]
        discount: Option<DiscountConvention>,

        /// Average each run with its mirrored path
        #[arg(long)]
        antithetic: bool,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        let log_level = match (&cli.log_level, cli.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        };

        let mut args = CliArgs {
            config_file: cli.config.clone(),
            log_level,
            spot: cli.spot,
            strike: cli.strike,
            rate: cli.rate,
            up: cli.up,
            down: cli.down,
            ..Default::default()
        };

        match &cli.command {
            Commands::Enumerate { steps, discount } => {
                args.steps = *steps;
                args.enumeration_discount = *discount;
            }
            Commands::Simulate {
                periods,
                runs,
                seed,
                discount,
                antithetic,
            } => {
                args.periods = *periods;
                args.runs = *runs;
                args.seed = *seed;
                args.simulation_discount = *discount;
                args.antithetic = *antithetic;
            }
            Commands::Compare {
                steps,
                runs,
                seed,
                discount,
                antithetic,
            } => {
                args.steps = *steps;
                args.runs = *runs;
                args.seed = *seed;
                args.enumeration_discount = *discount;
                args.antithetic = *antithetic;
            }
        }

        args
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &CliArgs) -> Result<CliConfig> {
    if let Some(path) = &args.config_file {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(build_config(args)?)
}

fn dispatch(command: &Commands, config: &CliConfig) -> Result<()> {
    match command {
        Commands::Enumerate { .. } => commands::enumerate::run(config),
        Commands::Simulate { .. } => commands::simulate::run(config),
        Commands::Compare { .. } => commands::compare::run(config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let args = CliArgs::from(&cli);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level.as_filter_str());
    info!("asian v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration resolved");

    match dispatch(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
