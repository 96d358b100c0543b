//! Operations on the `sales` table.
//!
//! One row per sale event. The simulation path only inserts; the query
//! methods serve export and admin tooling.

use std::str::FromStr;

use chrono::NaiveDateTime;
use floret_types::SaleRecord;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::error::DbError;

/// Operations on the `sales` table.
pub struct SalesStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SalesStore<'a> {
    /// Create a new sales store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one sale row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the insert fails.
    pub async fn insert(&self, sale: &SaleRecord) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO sales (recorded_at, flower, quantity, unit_price, profit)
              VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(sale.recorded_at)
        .bind(&sale.flower)
        .bind(i64::from(sale.quantity))
        .bind(sale.unit_price.to_string())
        .bind(sale.profit.to_string())
        .execute(self.pool)
        .await?;

        tracing::debug!(
            flower = sale.flower.as_str(),
            quantity = sale.quantity,
            "Inserted sale row"
        );
        Ok(())
    }

    /// The most recent sale rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn recent(&self, limit: u32) -> Result<Vec<SaleRow>, DbError> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r"SELECT id, recorded_at, flower, quantity, unit_price, profit
              FROM sales
              ORDER BY id DESC
              LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// All sale rows for a flower, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn for_flower(&self, flower: &str) -> Result<Vec<SaleRow>, DbError> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r"SELECT id, recorded_at, flower, quantity, unit_price, profit
              FROM sales
              WHERE flower = ?1
              ORDER BY id",
        )
        .bind(flower)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

/// A row from the `sales` table.
///
/// Keeps raw database types; [`SaleRow::into_record`] converts back to
/// the domain shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleRow {
    /// Auto-incremented row ID.
    pub id: i64,
    /// Simulated time of the sale.
    pub recorded_at: NaiveDateTime,
    /// Flower name.
    pub flower: String,
    /// Units sold.
    pub quantity: i64,
    /// Price per unit, stored as decimal text.
    pub unit_price: String,
    /// Sale profit, stored as decimal text.
    pub profit: String,
}

impl SaleRow {
    /// Convert back into a [`SaleRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Numeric`] if a money column does not hold a
    /// valid decimal.
    pub fn into_record(self) -> Result<SaleRecord, DbError> {
        let unit_price = Decimal::from_str(&self.unit_price).map_err(|source| DbError::Numeric {
            column: "sales.unit_price",
            source,
        })?;
        let profit = Decimal::from_str(&self.profit).map_err(|source| DbError::Numeric {
            column: "sales.profit",
            source,
        })?;
        Ok(SaleRecord {
            recorded_at: self.recorded_at,
            flower: self.flower,
            quantity: u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX),
            unit_price,
            profit,
        })
    }
}
