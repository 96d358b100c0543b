//! Maintenance operations on the archive.
//!
//! Row statistics and clearing exist for admin and export tooling;
//! nothing in the simulation path calls them.

use sqlx::SqlitePool;

use crate::error::DbError;

/// Row counts per archive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Rows in the `sales` table.
    pub sales_rows: u64,
    /// Rows in the `inventory` table.
    pub stock_rows: u64,
}

/// Count the rows in both archive tables.
///
/// # Errors
///
/// Returns [`DbError::Sqlite`] if a count query fails.
pub async fn stats(pool: &SqlitePool) -> Result<ArchiveStats, DbError> {
    let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(pool)
        .await?;
    let stock: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
        .fetch_one(pool)
        .await?;

    Ok(ArchiveStats {
        sales_rows: u64::try_from(sales.max(0)).unwrap_or(0),
        stock_rows: u64::try_from(stock.max(0)).unwrap_or(0),
    })
}

/// Delete every row from both archive tables.
///
/// Both deletes run in one transaction: the archive is either fully
/// cleared or untouched.
///
/// # Errors
///
/// Returns [`DbError::Sqlite`] if a delete fails; nothing is removed.
pub async fn clear_all(pool: &SqlitePool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM sales").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM inventory")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!("Archive cleared");
    Ok(())
}
