//! Storage abstraction for signature records
//!
//! This module provides a trait-based abstraction for the record store,
//! with an in-memory backend (tests, ephemeral deployments) and a SQLite
//! backend (default, durable).
//!
//! The store is append-only through this interface: records are created
//! once and read back by identity. Deletion is an out-of-band
//! administrative action.

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use signer_core::{NewSignatureRecord, SignatureRecord};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

use crate::config::MEMORY_DATABASE_URL;

/// Error type for storage operations
///
/// "No records" is never an error; it is an empty result.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Storage backend trait for signature records
///
/// Implementations must be thread-safe and support concurrent access.
/// Each `create` is atomic: a concurrent `find_by_identity` sees either the
/// whole record or nothing.
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// Append a record, returning the id the store assigned to it
    async fn create(&self, record: NewSignatureRecord) -> Result<i64, StorageError>;

    /// All records for an identity, in unspecified order
    async fn find_by_identity(&self, identity: &str) -> Result<Vec<SignatureRecord>, StorageError>;

    /// Total number of records held
    async fn count(&self) -> Result<u64, StorageError>;
}

/// Open the backend named by a database URL
///
/// `memory` selects [`MemoryStore`]; anything else is handed to the SQLite
/// backend.
pub async fn open(database_url: &str) -> Result<Arc<dyn RecordStore>, StorageError> {
    if database_url == MEMORY_DATABASE_URL {
        info!("Using in-memory record store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    open_persistent(database_url).await
}

#[cfg(feature = "sqlite")]
async fn open_persistent(database_url: &str) -> Result<Arc<dyn RecordStore>, StorageError> {
    let store = SqliteStore::new(database_url).await?;
    info!("Using SQLite record store");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite"))]
async fn open_persistent(database_url: &str) -> Result<Arc<dyn RecordStore>, StorageError> {
    Err(StorageError::Connection(format!(
        "no backend compiled in for {}",
        database_url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory() {
        let store = open("memory").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_open_sqlite_file() {
        let path = std::env::temp_dir().join(format!("signer-open-{}.db", std::process::id()));
        let url = format!("sqlite://{}", path.display());

        let store = open(&url).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        drop(store);
        let _ = std::fs::remove_file(&path);
    }
}
