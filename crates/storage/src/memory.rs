//! In-memory host store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use contracts::{BlacklistError, BlacklistRecord, HostStore, QueryResult, SourceMetadata};

/// `HostStore` backed by process memory.
///
/// Records live in insertion order; metadata is keyed by source name.
/// Writes from the refresh pipeline and reads from the lookup path share
/// the same locks, so readers can observe a purge before the replacement
/// data has fully landed - the same window the storage contract allows.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<BlacklistRecord>>,
    metadata: RwLock<HashMap<String, SourceMetadata>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records currently held, across all sources.
    pub fn record_count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl HostStore for MemoryStore {
    async fn metadata(&self, source: &str) -> Result<Option<SourceMetadata>, BlacklistError> {
        let metadata = self
            .metadata
            .read()
            .map_err(|_| BlacklistError::store("metadata lock poisoned"))?;
        Ok(metadata.get(source).cloned())
    }

    async fn remove_source(&self, source: &str) -> Result<(), BlacklistError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| BlacklistError::store("record lock poisoned"))?;
        records.retain(|record| record.source != source);
        drop(records);

        let mut metadata = self
            .metadata
            .write()
            .map_err(|_| BlacklistError::store("metadata lock poisoned"))?;
        metadata.remove(source);
        Ok(())
    }

    async fn register(&self, meta: SourceMetadata) -> Result<(), BlacklistError> {
        let mut metadata = self
            .metadata
            .write()
            .map_err(|_| BlacklistError::store("metadata lock poisoned"))?;
        // First write wins; a concurrent registration cannot duplicate rows.
        metadata.entry(meta.name.clone()).or_insert(meta);
        Ok(())
    }

    async fn insert(&self, record: BlacklistRecord) -> Result<(), BlacklistError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| BlacklistError::store("record lock poisoned"))?;
        records.push(record);
        Ok(())
    }

    async fn query(&self, hosts: &[String]) -> Result<Vec<QueryResult>, BlacklistError> {
        let records = self
            .records
            .read()
            .map_err(|_| BlacklistError::store("record lock poisoned"))?;

        Ok(hosts
            .iter()
            .map(|host| QueryResult {
                host: host.clone(),
                results: records
                    .iter()
                    .filter(|record| &record.host == host)
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}
