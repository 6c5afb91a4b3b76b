//! CLI configuration management
//!
//! Loads configuration from a TOML file, environment variables and command
//! line flags.
//!
//! ```toml
//! log_level = "debug"
//!
//! [model]
//! spot = 100.0
//! strike = 100.0
//! rate = 0.05
//! up = 0.2
//! down = -0.3
//!
//! [enumeration]
//! steps = 4
//! discount = "discrete"
//!
//! [simulation]
//! periods = 4
//! runs = 10000
//! seed = 42
//! discount = "continuous"
//! antithetic = false
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use asian_core::types::{BinomialModel, DiscountConvention, ModelError};
use asian_pricing::mc::{MAX_PERIODS, MAX_RUNS};
use asian_pricing::tree::MAX_ENUMERATION_STEPS;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "ASIAN_LOG_LEVEL";

/// Environment variable overriding the simulation seed
pub const ENV_SEED: &str = "ASIAN_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Exact enumeration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnumerationSettings {
    /// Tree depth
    pub steps: usize,
    /// Present-value convention
    pub discount: DiscountConvention,
}

impl Default for EnumerationSettings {
    fn default() -> Self {
        Self {
            steps: 4,
            discount: DiscountConvention::Discrete,
        }
    }
}

/// Monte Carlo settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Periods per path
    pub periods: usize,
    /// Number of runs
    pub runs: usize,
    /// Master seed; a fresh entropy seed is used when absent
    pub seed: Option<u64>,
    /// Present-value convention
    pub discount: DiscountConvention,
    /// Average each run with its mirrored path
    pub antithetic: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            periods: 4,
            runs: 10_000,
            seed: None,
            discount: DiscountConvention::Continuous,
            antithetic: false,
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Binomial model parameters
    pub model: BinomialModel,
    /// `enumerate` settings
    pub enumeration: EnumerationSettings,
    /// `simulate` settings
    pub simulation: SimulationSettings,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "{} must be an unsigned integer, got '{}'",
                    ENV_SEED, seed
                ))
            })?;
            self.simulation.seed = Some(seed);
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }

        let model = &mut self.model;
        for (value, field) in [
            (cli.spot, &mut model.spot),
            (cli.strike, &mut model.strike),
            (cli.rate, &mut model.rate),
            (cli.up, &mut model.up),
            (cli.down, &mut model.down),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }

        if let Some(steps) = cli.steps {
            self.enumeration.steps = steps;
        }
        if let Some(discount) = cli.enumeration_discount {
            self.enumeration.discount = discount;
        }
        if let Some(periods) = cli.periods {
            self.simulation.periods = periods;
        }
        if let Some(runs) = cli.runs {
            self.simulation.runs = runs;
        }
        if cli.seed.is_some() {
            self.simulation.seed = cli.seed;
        }
        if let Some(discount) = cli.simulation_discount {
            self.simulation.discount = discount;
        }
        if cli.antithetic {
            self.simulation.antithetic = true;
        }

        Ok(())
    }

    /// Validate the model parameters
    ///
    /// Count settings are checked per command by
    /// [`validate_enumeration`](Self::validate_enumeration) and
    /// [`validate_simulation`](Self::validate_simulation), so a section the
    /// dispatched command never reads cannot fail it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        Ok(())
    }

    /// Validate the `[enumeration]` section
    pub fn validate_enumeration(&self) -> Result<(), ConfigError> {
        if self.enumeration.steps > MAX_ENUMERATION_STEPS {
            return Err(ConfigError::InvalidValue {
                name: "enumeration.steps",
                reason: format!(
                    "{} exceeds the limit of {}",
                    self.enumeration.steps, MAX_ENUMERATION_STEPS
                ),
            });
        }
        Ok(())
    }

    /// Validate the `[simulation]` run count
    pub fn validate_runs(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RUNS).contains(&self.simulation.runs) {
            return Err(ConfigError::InvalidValue {
                name: "simulation.runs",
                reason: format!("{} outside [1, {}]", self.simulation.runs, MAX_RUNS),
            });
        }
        Ok(())
    }

    /// Validate the `[simulation]` section
    pub fn validate_simulation(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PERIODS).contains(&self.simulation.periods) {
            return Err(ConfigError::InvalidValue {
                name: "simulation.periods",
                reason: format!("{} outside [1, {}]", self.simulation.periods, MAX_PERIODS),
            });
        }
        self.validate_runs()
    }
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub rate: Option<f64>,
    pub up: Option<f64>,
    pub down: Option<f64>,
    pub steps: Option<usize>,
    pub enumeration_discount: Option<DiscountConvention>,
    pub periods: Option<usize>,
    pub runs: Option<usize>,
    pub seed: Option<u64>,
    pub simulation_discount: Option<DiscountConvention>,
    pub antithetic: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.merge_env(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.model, BinomialModel::default());
        assert_eq!(config.enumeration.steps, 4);
        assert_eq!(config.enumeration.discount, DiscountConvention::Discrete);
        assert_eq!(config.simulation.periods, 4);
        assert_eq!(config.simulation.runs, 10_000);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.simulation.discount, DiscountConvention::Continuous);
        assert!(!config.simulation.antithetic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"

            [model]
            spot = 50.0
            strike = 45.0
            rate = 0.01
            up = 0.1
            down = -0.1

            [enumeration]
            steps = 10
            discount = "continuous"

            [simulation]
            periods = 12
            runs = 5000
            seed = 7
            discount = "discrete"
            antithetic = true
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.model,
            BinomialModel::new(50.0, 45.0, 0.01, 0.1, -0.1).unwrap()
        );
        assert_eq!(config.enumeration.steps, 10);
        assert_eq!(config.enumeration.discount, DiscountConvention::Continuous);
        assert_eq!(config.simulation.periods, 12);
        assert_eq!(config.simulation.runs, 5000);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.discount, DiscountConvention::Discrete);
        assert!(config.simulation.antithetic);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            [model]
            strike = 110.0

            [simulation]
            runs = 2000
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        // Unspecified fields keep their defaults
        assert_eq!(config.model.spot, 100.0);
        assert_eq!(config.model.strike, 110.0);
        assert_eq!(config.model.down, -0.3);
        assert_eq!(config.simulation.runs, 2000);
        assert_eq!(config.simulation.periods, 4);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        assert!(toml::from_str::<CliConfig>(r#"log_level = "loud""#).is_err());
        assert!(toml::from_str::<CliConfig>("[enumeration]\ndiscount = \"simple\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!(
            "asian_cli_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[model]\nspot = 80.0\n").unwrap();
        let config = CliConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.model.spot, 80.0);

        let missing = CliConfig::from_file(Path::new("/nonexistent/asian.toml"));
        assert!(matches!(missing, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_LOG_LEVEL, "warn"), (ENV_SEED, " 1234 ")].into();
        let mut config = CliConfig::default();
        config
            .merge_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.simulation.seed, Some(1234));
    }

    #[test]
    fn test_bad_env_seed() {
        let mut config = CliConfig::default();
        let result = config.merge_env(|key| (key == ENV_SEED).then(|| "abc".to_string()));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig::default();
        let cli = CliArgs {
            log_level: Some("trace".to_string()),
            strike: Some(90.0),
            down: Some(-0.25),
            steps: Some(8),
            runs: Some(500),
            seed: Some(99),
            simulation_discount: Some(DiscountConvention::Discrete),
            antithetic: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.model.spot, 100.0);
        assert_eq!(config.model.strike, 90.0);
        assert_eq!(config.model.down, -0.25);
        assert_eq!(config.enumeration.steps, 8);
        assert_eq!(config.enumeration.discount, DiscountConvention::Discrete);
        assert_eq!(config.simulation.runs, 500);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.discount, DiscountConvention::Discrete);
        assert!(config.simulation.antithetic);
    }

    #[test]
    fn test_cli_overrides_env() {
        let cli = CliArgs {
            seed: Some(5),
            ..Default::default()
        };
        let config = build_config_with_env(&cli, |key| {
            (key == ENV_SEED).then(|| "6".to_string())
        })
        .unwrap();
        assert_eq!(config.simulation.seed, Some(5));

        let config = build_config_with_env(&CliArgs::default(), |key| {
            (key == ENV_SEED).then(|| "6".to_string())
        })
        .unwrap();
        assert_eq!(config.simulation.seed, Some(6));
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        config.enumeration.steps = MAX_ENUMERATION_STEPS + 1;
        assert!(matches!(
            config.validate_enumeration(),
            Err(ConfigError::InvalidValue {
                name: "enumeration.steps",
                ..
            })
        ));

        let mut config = CliConfig::default();
        config.simulation.runs = 0;
        assert!(matches!(
            config.validate_runs(),
            Err(ConfigError::InvalidValue {
                name: "simulation.runs",
                ..
            })
        ));
        assert!(config.validate_simulation().is_err());

        let mut config = CliConfig::default();
        config.simulation.periods = MAX_PERIODS + 1;
        assert!(config.validate_simulation().is_err());
        assert!(config.validate_runs().is_ok());

        let cli = CliArgs {
            spot: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, no_env),
            Err(ConfigError::Model(ModelError::InvalidParameter { name: "spot", .. }))
        ));
    }

    #[test]
    fn test_unused_sections_do_not_fail_loading() {
        let toml_str = r#"
            [enumeration]
            steps = 31

            [simulation]
            runs = 0
        "#;
        let path = std::env::temp_dir().join(format!(
            "asian_scoped_validation_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, toml_str).unwrap();
        let loaded = CliConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert!(config.validate_enumeration().is_err());
        assert!(config.validate_simulation().is_err());
    }

    #[test]
    fn test_arbitrage_is_left_to_pricing() {
        // Valid parameters that admit arbitrage still build a config
        let cli = CliArgs {
            rate: Some(0.45),
            ..Default::default()
        };
        let config = build_config_with_env(&cli, no_env).unwrap();
        assert_eq!(config.model.rate, 0.45);
    }
}
