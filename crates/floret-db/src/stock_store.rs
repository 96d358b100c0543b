//! Operations on the `inventory` table.
//!
//! One row per flower per step. Snapshot rows arrive in batches (the
//! whole catalog at once), so the insert path wraps each batch in a
//! transaction: either every flower's level lands or none do.

use std::str::FromStr;

use chrono::NaiveDateTime;
use floret_types::StockRecord;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::error::DbError;

/// Operations on the `inventory` table.
pub struct StockStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StockStore<'a> {
    /// Create a new stock store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append one batch of stock snapshot rows atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if any insert in the batch fails;
    /// the whole batch is rolled back.
    pub async fn insert_levels(&self, rows: &[StockRecord]) -> Result<(), DbError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                r"INSERT INTO inventory (recorded_at, flower, quantity, unit_price)
                  VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(row.recorded_at)
            .bind(&row.flower)
            .bind(i64::from(row.quantity))
            .bind(row.unit_price.to_string())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = rows.len(), "Inserted stock snapshot batch");
        Ok(())
    }

    /// The most recent snapshot rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn recent(&self, limit: u32) -> Result<Vec<StockRow>, DbError> {
        let rows = sqlx::query_as::<_, StockRow>(
            r"SELECT id, recorded_at, flower, quantity, unit_price
              FROM inventory
              ORDER BY id DESC
              LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// The latest recorded level for a flower, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn latest_for(&self, flower: &str) -> Result<Option<StockRow>, DbError> {
        let row = sqlx::query_as::<_, StockRow>(
            r"SELECT id, recorded_at, flower, quantity, unit_price
              FROM inventory
              WHERE flower = ?1
              ORDER BY id DESC
              LIMIT 1",
        )
        .bind(flower)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}

/// A row from the `inventory` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockRow {
    /// Auto-incremented row ID.
    pub id: i64,
    /// Simulated time of the snapshot.
    pub recorded_at: NaiveDateTime,
    /// Flower name.
    pub flower: String,
    /// Units on hand.
    pub quantity: i64,
    /// Quoted price at snapshot time, stored as decimal text.
    pub unit_price: String,
}

impl StockRow {
    /// Convert back into a [`StockRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Numeric`] if the price column does not hold a
    /// valid decimal.
    pub fn into_record(self) -> Result<StockRecord, DbError> {
        let unit_price = Decimal::from_str(&self.unit_price).map_err(|source| DbError::Numeric {
            column: "inventory.unit_price",
            source,
        })?;
        Ok(StockRecord {
            recorded_at: self.recorded_at,
            flower: self.flower,
            quantity: u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX),
            unit_price,
        })
    }
}
