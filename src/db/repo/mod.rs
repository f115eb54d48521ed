//! Repository layer for database operations.
//!
//! Methods are organized across submodules by concern:
//! - `catalysts.rs` - catalog reads and the atomic bulk replace
//! - `settings.rs` - the price-settings singleton
//!
//! Decimals are stored as canonical TEXT and parsed back on read, so values
//! survive storage without float drift.

mod catalysts;
mod settings;

use crate::domain::Decimal;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    /// A stored value that must be well-formed is not. Settings fall in this
    /// category: a half-readable price row must never default to zero.
    #[error("corrupt stored value in {context}: {detail}")]
    Corrupt { context: String, detail: String },
}

/// Metadata for one completed catalog import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLogEntry {
    pub import_id: String,
    pub imported_at: DateTime<Utc>,
    pub record_count: i64,
    pub checksum: String,
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parse a catalog decimal column, logging and falling back to zero on
/// garbage. Catalog data quality is the import boundary's job; rows can only
/// get here malformed if the database was edited by hand.
pub(crate) fn parse_decimal_or_zero(catalyst_id: &str, field: &str, raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        warn!(
            catalyst_id = %catalyst_id,
            field = %field,
            value = %raw,
            error = %e,
            "Failed to parse stored decimal, using zero"
        );
        Decimal::default()
    })
}
