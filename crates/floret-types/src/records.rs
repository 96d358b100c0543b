//! Append-only row shapes written to the archive.
//!
//! One [`SaleRecord`] per sale event, one [`StockRecord`] per flower
//! per step. These mirror the `sales` and `inventory` table schemas;
//! export tooling reads the tables directly, so the field set is part
//! of the external contract.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed sale of one flower kind within a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Simulated time of the sale.
    pub recorded_at: NaiveDateTime,
    /// Flower name (catalog key).
    pub flower: String,
    /// Units sold.
    pub quantity: u32,
    /// Price per unit at sale time.
    pub unit_price: Decimal,
    /// Profit for the whole sale: `(unit_price - unit_cost) * quantity`.
    pub profit: Decimal,
}

/// A point-in-time stock level for one flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Simulated time of the snapshot.
    pub recorded_at: NaiveDateTime,
    /// Flower name (catalog key).
    pub flower: String,
    /// Units on hand.
    pub quantity: u32,
    /// Current quoted price at snapshot time.
    pub unit_price: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn sale_record_serde_roundtrip() {
        let record = SaleRecord {
            recorded_at: NaiveDate::from_ymd_opt(2024, 4, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            flower: "Tulips".to_owned(),
            quantity: 14,
            unit_price: Decimal::new(80, 0),
            profit: Decimal::new(560, 0),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SaleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
