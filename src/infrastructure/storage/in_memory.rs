//! In-memory entity store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::traits::{EntityStore, StoreRecord};
use crate::domain::user::{UserRecord, UserStore};
use crate::domain::DomainError;

/// Thread-safe in-memory record store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryEntityStore<R: StoreRecord> {
    records: RwLock<HashMap<String, R>>,
}

impl<R: StoreRecord> Default for InMemoryEntityStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StoreRecord> InMemoryEntityStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-populated with records
    pub fn with_records(records: Vec<R>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.record_id().to_string(), r))
            .collect();

        Self {
            records: RwLock::new(map),
        }
    }

    /// Inserts or replaces a record
    pub fn upsert(&self, record: R) -> Result<(), DomainError> {
        self.records
            .write()
            .map_err(|_| DomainError::storage("Failed to acquire write lock"))?
            .insert(record.record_id().to_string(), record);
        Ok(())
    }

    pub fn remove(&self, id: &str) -> Result<Option<R>, DomainError> {
        Ok(self
            .records
            .write()
            .map_err(|_| DomainError::storage("Failed to acquire write lock"))?
            .remove(id))
    }

    fn find<F>(&self, predicate: F) -> Result<Option<R>, DomainError>
    where
        F: Fn(&R) -> bool,
    {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::storage("Failed to acquire read lock"))?;

        Ok(records.values().find(|r| predicate(r)).cloned())
    }
}

#[async_trait]
impl<R: StoreRecord> EntityStore for InMemoryEntityStore<R> {
    type Record = R;

    async fn find_by_id(&self, id: &str) -> Result<Option<R>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::storage("Failed to acquire read lock"))?;

        Ok(records.get(id).cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryEntityStore<UserRecord> {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        self.find(|user| user.username == username)
    }
}
