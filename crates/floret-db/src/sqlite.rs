//! `SQLite` connection pool and schema initialization.
//!
//! The archive is a single local file (the original deployment shape);
//! `:memory:` is supported for tests. Schema initialization is
//! idempotent -- both tables are created with `IF NOT EXISTS` so a
//! fresh file and an existing archive take the same path.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::DbError;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection acquire timeout in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Configuration for the `SQLite` archive.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Database path or URL (e.g. `floret.db` or `sqlite::memory:`).
    pub path: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Connection acquire timeout.
    pub acquire_timeout: Duration,
}

impl ArchiveConfig {
    /// Create a new configuration from a database path.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    /// In-memory configuration for tests.
    ///
    /// Pins the pool to a single connection: each `SQLite` in-memory
    /// connection is its own database, so a larger pool would scatter
    /// rows across invisible databases.
    pub fn in_memory() -> Self {
        Self {
            path: "sqlite::memory:".to_owned(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Connection pool handle to the `SQLite` archive.
#[derive(Clone)]
pub struct SqliteArchive {
    pool: SqlitePool,
}

impl SqliteArchive {
    /// Connect to the archive using the provided configuration.
    ///
    /// Creates the database file if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the path cannot be parsed, or
    /// [`DbError::Sqlite`] if the connection fails.
    pub async fn connect(config: &ArchiveConfig) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(&config.path)
            .map_err(|e| DbError::Config(format!("invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        tracing::info!(
            path = config.path.as_str(),
            max_connections = config.max_connections,
            "Connected to SQLite archive"
        );

        Ok(Self { pool })
    }

    /// Connect using a database path with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection fails.
    pub async fn connect_path(path: &str) -> Result<Self, DbError> {
        Self::connect(&ArchiveConfig::new(path)).await
    }

    /// Create the archive tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if a statement fails.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS sales (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT    NOT NULL,
                flower      TEXT    NOT NULL,
                quantity    INTEGER NOT NULL,
                unit_price  TEXT    NOT NULL,
                profit      TEXT    NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS inventory (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT    NOT NULL,
                flower      TEXT    NOT NULL,
                quantity    INTEGER NOT NULL,
                unit_price  TEXT    NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Archive schema initialized");
        Ok(())
    }

    /// Return a reference to the underlying [`SqlitePool`].
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite archive pool closed");
    }
}
