//! SQLite storage backend
//!
//! Persistent record store using SQLite through sqlx.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE signatures (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     user_id TEXT NOT NULL,
//!     hash TEXT NOT NULL,
//!     timestamp TEXT NOT NULL,
//!     answers TEXT NOT NULL
//! );
//! ```
//!
//! Existing `signer.db` files from earlier deployments declared these columns
//! as `STRING`, which SQLite gives numeric affinity, so a numeric `user_id`
//! may be stored as an INTEGER. Reads cast every text column back to TEXT.

use async_trait::async_trait;
use signer_core::{NewSignatureRecord, SignatureRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use super::{RecordStore, StorageError};

/// SQLite record store implementation
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url`,
    /// e.g. `sqlite://signer.db`
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        info!(url = %database_url, "Connected to SQLite database");

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` is a separate database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table and index if they don't exist
    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signatures (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                hash TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                answers TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_signatures_user_id ON signatures(user_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        info!("Database migrations complete");
        Ok(())
    }

    /// Get the connection pool for direct access if needed
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn record_from_row(row: &SqliteRow) -> Result<SignatureRecord, sqlx::Error> {
    Ok(SignatureRecord {
        id: row.try_get("id")?,
        identity: row.try_get("user_id")?,
        fingerprint: row.try_get("hash")?,
        answers: row.try_get("answers")?,
        timestamp: row.try_get("timestamp")?,
    })
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create(&self, record: NewSignatureRecord) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO signatures (user_id, hash, timestamp, answers)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.identity)
        .bind(&record.fingerprint)
        .bind(&record.timestamp)
        .bind(&record.answers)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert signature record");
            StorageError::Database(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Vec<SignatureRecord>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id,
                   CAST(user_id AS TEXT) AS user_id,
                   CAST(hash AS TEXT) AS hash,
                   CAST(timestamp AS TEXT) AS timestamp,
                   CAST(answers AS TEXT) AS answers
            FROM signatures
            WHERE user_id = ?1
            ORDER BY id
            "#,
        )
        .bind(identity)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        rows.iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM signatures")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let n: i64 = row
            .try_get("n")
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(n.max(0) as u64)
    }
}
