//! The append-only persistence seam between the simulation core and
//! the data layer.
//!
//! The core never talks to storage directly. It emits [`SaleRecord`]
//! and [`StockRecord`] rows, and the runner flushes them through a
//! [`RecordSink`]. A sink failure is fatal to the simulation run — no
//! retry policy is defined at this layer.

use async_trait::async_trait;

use crate::records::{SaleRecord, StockRecord};

/// An archive write failed.
///
/// The seam deliberately erases the storage technology, so the error
/// carries only a message from the underlying driver.
#[derive(Debug, thiserror::Error)]
#[error("archive write failed: {0}")]
pub struct SinkError(pub String);

/// Append-only archive interface. Exactly two operations: the
/// simulation path never updates or deletes.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append one sale event row.
    async fn record_sale(&self, sale: &SaleRecord) -> Result<(), SinkError>;

    /// Append one stock snapshot row per flower for the current step.
    async fn record_stock_levels(&self, rows: &[StockRecord]) -> Result<(), SinkError>;
}

/// A sink that discards everything. Used by tests and dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl RecordSink for NullSink {
    async fn record_sale(&self, _sale: &SaleRecord) -> Result<(), SinkError> {
        Ok(())
    }

    async fn record_stock_levels(&self, _rows: &[StockRecord]) -> Result<(), SinkError> {
        Ok(())
    }
}
