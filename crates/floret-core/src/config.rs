//! Configuration loading and typed config structures for the Floret
//! shop simulation.
//!
//! The canonical configuration lives in `floret-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads and validates
//! the file. All fields carry serde defaults so a partial (or empty)
//! file yields a runnable configuration.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use floret_types::FlowerSpec;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShopConfig {
    /// Shop-level settings (seed, budget, hours, demand volume).
    #[serde(default)]
    pub shop: ShopParams,

    /// The flower catalog. Defaults to the standard four-flower set.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<FlowerSpec>,

    /// Archive storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl ShopConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `FLORET_DATABASE_PATH` environment variable overrides
    /// `storage.database_path` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.storage.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty (or whitespace-only) document yields the full default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            shop: ShopParams::default(),
            catalog: default_catalog(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            simulation: SimulationBoundsConfig::default(),
        }
    }
}

/// Shop-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShopParams {
    /// Human-readable shop name.
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Random seed for reproducible demand noise.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulated timestamp the clock starts at.
    #[serde(default = "default_start_time")]
    pub start_time: NaiveDateTime,

    /// Starting purchasing budget, in whole currency units.
    #[serde(default = "default_initial_budget")]
    pub initial_budget: u64,

    /// Expected customers per day, before hourly and weekday shaping.
    #[serde(default = "default_daily_customers")]
    pub daily_customers: u32,

    /// First selling hour of the day (inclusive).
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,

    /// First non-selling hour of the day (exclusive).
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,

    /// Starting stock per flower.
    #[serde(default = "default_initial_stock")]
    pub initial_stock: u32,

    /// Hours between recommendation cycles (0 disables the cycle).
    #[serde(default = "default_recommendation_interval_hours")]
    pub recommendation_interval_hours: u32,
}

impl Default for ShopParams {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            seed: default_seed(),
            start_time: default_start_time(),
            initial_budget: default_initial_budget(),
            daily_customers: default_daily_customers(),
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
            initial_stock: default_initial_stock(),
            recommendation_interval_hours: default_recommendation_interval_hours(),
        }
    }
}

impl ShopParams {
    /// The starting budget as a [`Decimal`].
    pub fn initial_budget_decimal(&self) -> Decimal {
        Decimal::from(self.initial_budget)
    }
}

/// Archive storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path of the `SQLite` archive file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl StorageConfig {
    /// Override the archive path with `FLORET_DATABASE_PATH` when set.
    ///
    /// This lets deployments relocate the archive without editing the
    /// YAML config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FLORET_DATABASE_PATH") {
            self.database_path = val;
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Simulation boundary configuration.
///
/// A `max_steps` of 0 means unlimited: the run ends only on an
/// operator stop request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of steps before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_steps: u64,

    /// Real-time milliseconds between steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: 0,
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

/// The standard four-flower catalog.
fn default_catalog() -> Vec<FlowerSpec> {
    vec![
        FlowerSpec {
            name: "Roses".to_owned(),
            base_price: Decimal::new(150, 0),
            unit_cost: Decimal::new(80, 0),
            popularity: 0.30,
        },
        FlowerSpec {
            name: "Tulips".to_owned(),
            base_price: Decimal::new(80, 0),
            unit_cost: Decimal::new(40, 0),
            popularity: 0.20,
        },
        FlowerSpec {
            name: "Chrysanthemums".to_owned(),
            base_price: Decimal::new(70, 0),
            unit_cost: Decimal::new(35, 0),
            popularity: 0.15,
        },
        FlowerSpec {
            name: "Gerberas".to_owned(),
            base_price: Decimal::new(90, 0),
            unit_cost: Decimal::new(45, 0),
            popularity: 0.12,
        },
    ]
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_shop_name() -> String {
    "Floret".to_owned()
}

const fn default_seed() -> u64 {
    42
}

fn default_start_time() -> NaiveDateTime {
    // Monday 2024-04-01 00:00; a fixed start keeps runs reproducible.
    NaiveDate::from_ymd_opt(2024, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

const fn default_initial_budget() -> u64 {
    1_000_000
}

const fn default_daily_customers() -> u32 {
    5_000
}

const fn default_opening_hour() -> u32 {
    8
}

const fn default_closing_hour() -> u32 {
    20
}

const fn default_initial_stock() -> u32 {
    1_000
}

const fn default_recommendation_interval_hours() -> u32 {
    4
}

fn default_database_path() -> String {
    "floret.db".to_owned()
}

const fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_step_interval_ms() -> u64 {
    1_000
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ShopConfig::default();
        assert_eq!(config.shop.seed, 42);
        assert_eq!(config.shop.initial_budget, 1_000_000);
        assert_eq!(config.shop.daily_customers, 5_000);
        assert_eq!(config.shop.opening_hour, 8);
        assert_eq!(config.shop.closing_hour, 20);
        assert_eq!(config.catalog.len(), 4);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
shop:
  name: "Corner Florist"
  seed: 123
  start_time: "2024-06-03T08:00:00"
  initial_budget: 50000
  daily_customers: 800
  opening_hour: 9
  closing_hour: 18
  initial_stock: 200
  recommendation_interval_hours: 6

catalog:
  - name: "Peonies"
    base_price: 120
    unit_cost: 60
    popularity: 0.5

storage:
  database_path: "test.db"
  max_connections: 2

logging:
  level: "debug"

simulation:
  max_steps: 48
  step_interval_ms: 0
"#;
        let config = ShopConfig::parse(yaml).unwrap();
        assert_eq!(config.shop.name, "Corner Florist");
        assert_eq!(config.shop.seed, 123);
        assert_eq!(config.shop.opening_hour, 9);
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(
            config.catalog.first().map(|f| f.unit_cost),
            Some(Decimal::new(60, 0)),
        );
        assert_eq!(config.storage.max_connections, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.simulation.max_steps, 48);
        assert_eq!(config.simulation.step_interval_ms, 0);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "shop:\n  seed: 7\n";
        let config = ShopConfig::parse(yaml).unwrap();
        assert_eq!(config.shop.seed, 7);
        // Everything else uses defaults.
        assert_eq!(config.shop.daily_customers, 5_000);
        assert_eq!(config.catalog.len(), 4);
        assert_eq!(config.simulation.step_interval_ms, 1_000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(ShopConfig::parse("").is_ok());
    }

    #[test]
    fn default_catalog_popularities_sum_below_one() {
        let total: f64 = default_catalog().iter().map(|f| f.popularity).sum();
        assert!(total < 1.0);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("floret-config.yaml");
        if path.exists() {
            let config = ShopConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
