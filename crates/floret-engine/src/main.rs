//! Simulation engine binary for the Floret flower shop.
//!
//! This is the main entry point that wires together the shop state,
//! the `SQLite` archive, and the operator controls, then drives the
//! step loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `floret-config.yaml` (or `FLORET_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect to the `SQLite` archive and initialize the schema
//! 4. Build the shop state from the catalog configuration
//! 5. Create operator state and install the ctrl-c stop handler
//! 6. Run the simulation loop
//! 7. Log the result and the final dashboard totals

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use floret_core::config::ShopConfig;
use floret_core::operator::OperatorState;
use floret_core::runner;
use floret_core::shop::FlowerShop;
use floret_db::{ArchiveConfig, ArchiveSink, SqliteArchive};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default configuration file name, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "floret-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (before logging init so the configured
    //    level can seed the filter).
    let path = config_path();
    let file_found = path.exists();
    let config = load_config(&path)?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    if !file_found {
        warn!(path = %path.display(), "Config file not found, using defaults");
    }
    info!(
        shop = config.shop.name.as_str(),
        seed = config.shop.seed,
        daily_customers = config.shop.daily_customers,
        opening_hour = config.shop.opening_hour,
        closing_hour = config.shop.closing_hour,
        "floret-engine starting"
    );

    // 3. Connect to the archive and initialize the schema.
    let archive_config = ArchiveConfig::new(&config.storage.database_path)
        .with_max_connections(config.storage.max_connections);
    let archive = SqliteArchive::connect(&archive_config)
        .await
        .context("failed to open the archive database")?;
    archive
        .init_schema()
        .await
        .context("failed to initialize the archive schema")?;
    let sink = ArchiveSink::new(&archive);

    // 4. Build the shop state.
    let mut shop = FlowerShop::from_config(&config).context("invalid shop configuration")?;
    info!(
        flowers = shop.catalog().len(),
        budget = %shop.ledger().budget(),
        "Shop initialized"
    );

    // 5. Operator state + ctrl-c stop handler.
    let operator = Arc::new(OperatorState::new(&config.simulation));
    spawn_stop_handler(Arc::clone(&operator));
    info!(
        max_steps = operator.max_steps(),
        step_interval_ms = operator.step_interval_ms(),
        "Operator state initialized"
    );

    // 6. Run the simulation loop.
    let outcome = runner::run_simulation(&mut shop, &sink, &operator)
        .await
        .context("simulation aborted")?;

    // 7. Final logging and cleanup.
    runner::log_run_end(&outcome);
    let snapshot = shop.snapshot();
    info!(
        current_time = snapshot.current_time.as_str(),
        budget = %snapshot.budget,
        today_revenue = %snapshot.today_revenue,
        today_profit = %snapshot.today_profit,
        today_units = snapshot.today_units,
        "Final dashboard totals"
    );
    archive.close().await;

    Ok(())
}

/// Install a ctrl-c handler that requests a clean stop.
///
/// Cancellation is cooperative: the loop notices the flag at its next
/// iteration, so shutdown latency is at most one step interval.
fn spawn_stop_handler(operator: Arc<OperatorState>) {
    let _handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, requesting stop");
            operator.request_stop();
        }
    });
}

/// The configuration file path: `FLORET_CONFIG` or the default.
fn config_path() -> PathBuf {
    std::env::var("FLORET_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the configuration file, falling back to built-in defaults when
/// the file does not exist.
fn load_config(path: &Path) -> anyhow::Result<ShopConfig> {
    if path.exists() {
        ShopConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))
    } else {
        ShopConfig::parse("").context("failed to build default configuration")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = load_config(Path::new("does-not-exist.yaml")).unwrap();
        assert_eq!(config.shop.daily_customers, 5_000);
        assert_eq!(config.catalog.len(), 4);
    }
}
