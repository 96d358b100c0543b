//! Error types for the archive layer.
//!
//! All errors are propagated via [`DbError`], which wraps the
//! underlying [`sqlx`] errors with additional context about which
//! value failed to decode.

/// Errors that can occur in the archive layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A stored numeric value could not be decoded.
    ///
    /// Money columns are stored as TEXT for exact decimal round-trips;
    /// this fires if a row holds something that is not a decimal.
    #[error("invalid decimal in column {column}: {source}")]
    Numeric {
        /// The column holding the bad value.
        column: &'static str,
        /// The underlying parse error.
        source: rust_decimal::Error,
    },

    /// A configuration error (bad path or URL).
    #[error("archive configuration error: {0}")]
    Config(String),
}
