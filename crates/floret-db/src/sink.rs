//! The [`RecordSink`] implementation backed by the `SQLite` archive.
//!
//! This is the only place the simulation core's persistence seam meets
//! a concrete storage technology. Errors are flattened to [`SinkError`]
//! messages at the boundary; the core neither knows nor cares that the
//! archive is `SQLite`.

use async_trait::async_trait;
use floret_types::{RecordSink, SaleRecord, SinkError, StockRecord};
use sqlx::SqlitePool;

use crate::sales_store::SalesStore;
use crate::sqlite::SqliteArchive;
use crate::stock_store::StockStore;

/// Archive-backed sink handed to the simulation runner.
#[derive(Clone)]
pub struct ArchiveSink {
    pool: SqlitePool,
}

impl ArchiveSink {
    /// Create a sink over an archive's connection pool.
    pub fn new(archive: &SqliteArchive) -> Self {
        Self {
            pool: archive.pool().clone(),
        }
    }
}

#[async_trait]
impl RecordSink for ArchiveSink {
    async fn record_sale(&self, sale: &SaleRecord) -> Result<(), SinkError> {
        SalesStore::new(&self.pool)
            .insert(sale)
            .await
            .map_err(|e| SinkError(e.to_string()))
    }

    async fn record_stock_levels(&self, rows: &[StockRecord]) -> Result<(), SinkError> {
        StockStore::new(&self.pool)
            .insert_levels(rows)
            .await
            .map_err(|e| SinkError(e.to_string()))
    }
}
