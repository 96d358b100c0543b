//! Shared type definitions for the Floret shop simulation.
//!
//! This crate holds the plain data types passed between the simulation
//! core and the data layer: the flower catalog, the append-only row
//! shapes, the recommendation snapshot, the dashboard view, and the
//! [`RecordSink`] persistence seam.
//!
//! [`RecordSink`]: sink::RecordSink

pub mod catalog;
pub mod records;
pub mod recommend;
pub mod sink;
pub mod snapshot;

pub use catalog::{Catalog, FlowerSpec};
pub use records::{SaleRecord, StockRecord};
pub use recommend::{RecommendationSet, ReorderAdvice, ReorderUrgency};
pub use sink::{NullSink, RecordSink, SinkError};
pub use snapshot::{DashboardSnapshot, FlowerStatus};
