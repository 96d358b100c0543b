//! Simulation loop runner with operator controls.
//!
//! [`run_simulation`] drives the step cycle with support for:
//!
//! - **Bounded runs**: stop after `max_steps`
//! - **Pause/resume**: the operator can halt and continue the loop
//! - **Variable step speed**: step interval adjustable at runtime
//! - **Clean stop**: cooperative cancellation checked every iteration
//!
//! After each step the collected archive rows are flushed through the
//! [`RecordSink`]. Persistence is synchronous with respect to the loop
//! and a sink failure is fatal: the run aborts with the error, no
//! retries.

use std::sync::Arc;

use floret_types::{RecordSink, SinkError};
use tracing::info;

use crate::operator::{OperatorState, RunEndReason};
use crate::shop::{FlowerShop, StepSummary};

/// Errors that can occur during a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// An archive write failed; the run was aborted.
    #[error("persistence failed: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}

/// Result of a completed simulation run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<StepSummary>,
    /// Total number of steps executed.
    pub total_steps: u64,
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError::Sink`] if an archive write fails; the step
/// whose rows failed to flush is the last step executed.
pub async fn run_simulation(
    shop: &mut FlowerShop,
    sink: &dyn RecordSink,
    operator: &Arc<OperatorState>,
) -> Result<RunOutcome, RunnerError> {
    let mut last_summary: Option<StepSummary> = None;
    let mut total_steps: u64 = 0;

    info!(
        max_steps = operator.max_steps(),
        step_interval_ms = operator.step_interval_ms(),
        "Simulation starting"
    );

    loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Simulation paused, waiting for resume...");
            operator.wait_if_paused().await;
            info!("Simulation resumed");
        }

        // --- Check stop request (before step) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            return Ok(RunOutcome {
                end_reason: RunEndReason::OperatorStop,
                final_summary: last_summary,
                total_steps,
            });
        }

        // --- Execute step ---
        let summary = shop.step();

        // --- Flush archive rows (fatal on failure) ---
        for sale in &summary.sales {
            sink.record_sale(sale).await?;
        }
        sink.record_stock_levels(&summary.stock_levels).await?;

        total_steps = total_steps.saturating_add(1);

        info!(
            timestamp = %summary.timestamp,
            open = summary.open,
            today_units = summary.today_units,
            today_profit = %summary.today_profit,
            "Step completed"
        );

        // --- Check step limit (after step) ---
        if operator.step_limit_reached(total_steps) {
            info!(
                total_steps,
                max_steps = operator.max_steps(),
                "Step limit reached"
            );
            return Ok(RunOutcome {
                end_reason: RunEndReason::MaxStepsReached,
                final_summary: Some(summary),
                total_steps,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for step interval ---
        let interval_ms = operator.step_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the simulation end summary.
///
/// Called after [`run_simulation`] returns to record why the run ended
/// and what the final state looked like.
pub fn log_run_end(outcome: &RunOutcome) {
    info!(
        reason = ?outcome.end_reason,
        total_steps = outcome.total_steps,
        final_units = outcome.final_summary.as_ref().map(|s| s.today_units),
        "Simulation ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use floret_types::{NullSink, SaleRecord, StockRecord};

    use super::*;
    use crate::config::{ShopConfig, ShopParams, SimulationBoundsConfig};

    fn make_shop(start_hour: u32) -> FlowerShop {
        let mut config = ShopConfig::parse("").unwrap();
        config.shop = ShopParams {
            start_time: NaiveDate::from_ymd_opt(2024, 4, 1)
                .unwrap()
                .and_hms_opt(start_hour, 0, 0)
                .unwrap(),
            ..ShopParams::default()
        };
        FlowerShop::from_config(&config).unwrap()
    }

    fn operator(max_steps: u64) -> Arc<OperatorState> {
        Arc::new(OperatorState::new(&SimulationBoundsConfig {
            max_steps,
            step_interval_ms: 0,
        }))
    }

    #[tokio::test]
    async fn bounded_by_max_steps() {
        let mut shop = make_shop(0);
        let op = operator(24);

        let outcome = run_simulation(&mut shop, &NullSink, &op).await.unwrap();

        assert_eq!(outcome.end_reason, RunEndReason::MaxStepsReached);
        assert_eq!(outcome.total_steps, 24);
        assert!(outcome.final_summary.is_some());
    }

    #[tokio::test]
    async fn stop_request_before_first_step() {
        let mut shop = make_shop(0);
        let op = operator(0);
        op.request_stop();

        let outcome = run_simulation(&mut shop, &NullSink, &op).await.unwrap();

        assert_eq!(outcome.end_reason, RunEndReason::OperatorStop);
        assert_eq!(outcome.total_steps, 0);
        assert!(outcome.final_summary.is_none());
    }

    /// A sink that fails on the first stock flush.
    struct FailingSink;

    #[async_trait]
    impl RecordSink for FailingSink {
        async fn record_sale(&self, _sale: &SaleRecord) -> Result<(), SinkError> {
            Ok(())
        }

        async fn record_stock_levels(&self, _rows: &[StockRecord]) -> Result<(), SinkError> {
            Err(SinkError("disk full".to_owned()))
        }
    }

    #[tokio::test]
    async fn sink_failure_aborts_run() {
        let mut shop = make_shop(0);
        let op = operator(24);

        let result = run_simulation(&mut shop, &FailingSink, &op).await;
        assert!(matches!(result, Err(RunnerError::Sink { .. })));
        // The failed step still mutated the shop: the clock advanced.
        assert_eq!(shop.clock().hour(), 1);
    }

    /// A sink that counts what it receives.
    #[derive(Default)]
    struct CountingSink {
        sales: std::sync::atomic::AtomicU64,
        stock_rows: std::sync::atomic::AtomicU64,
    }

    #[async_trait]
    impl RecordSink for CountingSink {
        async fn record_sale(&self, _sale: &SaleRecord) -> Result<(), SinkError> {
            let _ = self
                .sales
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Ok(())
        }

        async fn record_stock_levels(&self, rows: &[StockRecord]) -> Result<(), SinkError> {
            let _ = self
                .stock_rows
                .fetch_add(rows.len() as u64, std::sync::atomic::Ordering::Relaxed);
            Ok(())
        }
    }

    #[tokio::test]
    async fn every_step_flushes_stock_snapshot() {
        let mut shop = make_shop(0);
        let op = operator(6);
        let sink = CountingSink::default();

        let outcome = run_simulation(&mut shop, &sink, &op).await.unwrap();

        assert_eq!(outcome.total_steps, 6);
        // 4 flowers * 6 steps, open or closed.
        assert_eq!(
            sink.stock_rows.load(std::sync::atomic::Ordering::Relaxed),
            24,
        );
        // Hours 1..=6 are all closed: no sales flushed.
        assert_eq!(sink.sales.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn open_hours_flush_sales() {
        let mut shop = make_shop(8);
        let op = operator(4);
        let sink = CountingSink::default();

        let _ = run_simulation(&mut shop, &sink, &op).await.unwrap();
        assert!(sink.sales.load(std::sync::atomic::Ordering::Relaxed) > 0);
    }
}
