//! In-memory storage backend
//!
//! Record store backed by a vector behind a lock.
//! Suitable for tests and single-instance deployments.
//! Data is lost on restart.

use async_trait::async_trait;
use signer_core::{NewSignatureRecord, SignatureRecord};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use super::{RecordStore, StorageError};

#[derive(Debug, Default)]
struct Records {
    rows: Vec<SignatureRecord>,
    last_id: i64,
}

/// In-memory record store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record verbatim, bypassing id assignment.
    ///
    /// Stands in for administrative writes (imports, repairs) that do not go
    /// through the signing path.
    pub fn insert_raw(&self, record: SignatureRecord) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.last_id = records.last_id.max(record.id);
        records.rows.push(record);
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StorageError {
    StorageError::Database("record store lock poisoned".into())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, record: NewSignatureRecord) -> Result<i64, StorageError> {
        // Id assignment and append happen under one write lock
        let mut records = self.records.write().map_err(poisoned)?;
        records.last_id += 1;
        let id = records.last_id;
        records.rows.push(record.with_id(id));

        debug!(id = id, "Stored signature record");
        Ok(id)
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Vec<SignatureRecord>, StorageError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .rows
            .iter()
            .filter(|r| r.identity == identity)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_record(identity: &str, fingerprint: &str) -> NewSignatureRecord {
        NewSignatureRecord {
            identity: identity.to_string(),
            fingerprint: fingerprint.to_string(),
            answers: r#"{"question":"answer"}"#.to_string(),
            timestamp: "2024-01-02T15:04:05Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let first = store.create(new_record("alice", "aa")).await.unwrap();
        let second = store.create(new_record("alice", "bb")).await.unwrap();

        assert!(second > first);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_identity_filters() {
        let store = MemoryStore::new();
        store.create(new_record("alice", "aa")).await.unwrap();
        store.create(new_record("bob", "bb")).await.unwrap();
        store.create(new_record("alice", "cc")).await.unwrap();

        let records = store.find_by_identity("alice").await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.identity == "alice"));
    }

    #[tokio::test]
    async fn test_unknown_identity_is_empty_not_error() {
        let store = MemoryStore::new();
        let records = store.find_by_identity("nobody").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_insert_raw_keeps_ids_monotonic() {
        let store = MemoryStore::new();
        store
            .insert_raw(new_record("alice", "aa").with_id(41))
            .unwrap();

        let next = store.create(new_record("alice", "bb")).await.unwrap();
        assert_eq!(next, 42);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(new_record("alice", &format!("{:02x}", i))).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(store.find_by_identity("alice").await.unwrap().len(), 32);
    }
}
