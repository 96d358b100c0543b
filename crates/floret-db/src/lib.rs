//! `SQLite` archive layer for the Floret shop simulation.
//!
//! The archive is an append-only local `SQLite` file with two tables:
//! `sales` (one row per sale event) and `inventory` (one row per flower
//! per step). The simulation path only ever inserts; querying, row
//! statistics, and clearing are maintenance operations for export and
//! admin tooling, never called from the step loop.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) to avoid requiring a live database at build time. All
//! queries are parameterized.
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool wrapper and schema initialization
//! - [`sales_store`] -- Appends and queries on the `sales` table
//! - [`stock_store`] -- Appends and queries on the `inventory` table
//! - [`maintenance`] -- Row statistics and clear-all
//! - [`sink`] -- The [`RecordSink`] implementation backed by the archive
//! - [`error`] -- Shared error types
//!
//! [`RecordSink`]: floret_types::RecordSink

pub mod error;
pub mod maintenance;
pub mod sales_store;
pub mod sink;
pub mod sqlite;
pub mod stock_store;

pub use error::DbError;
pub use maintenance::ArchiveStats;
pub use sales_store::{SaleRow, SalesStore};
pub use sink::ArchiveSink;
pub use sqlite::{ArchiveConfig, SqliteArchive};
pub use stock_store::{StockRow, StockStore};
