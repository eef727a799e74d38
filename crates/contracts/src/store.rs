//! HostStore trait - storage sink boundary
//!
//! Defines the abstract interface to the blacklisted-host store.

use async_trait::async_trait;

use crate::{BlacklistError, BlacklistRecord, QueryResult, SourceMetadata};

/// Storage boundary consumed by the refresh pipeline and the lookup path.
///
/// Implementations own whatever consistency they need. The pipeline accepts
/// a window where a purge has landed but the replacement data has not yet
/// fully arrived; stale reads during a refresh are possible.
#[async_trait]
pub trait HostStore: Send + Sync {
    /// Stored metadata for a source, if any.
    async fn metadata(&self, source: &str) -> Result<Option<SourceMetadata>, BlacklistError>;

    /// Remove all records and the metadata for a source. Idempotent.
    async fn remove_source(&self, source: &str) -> Result<(), BlacklistError>;

    /// Write source metadata. No-op if metadata with this name already
    /// exists.
    async fn register(&self, meta: SourceMetadata) -> Result<(), BlacklistError>;

    /// Insert a single record.
    ///
    /// Callers treat failures as per-record (logged and skipped), never
    /// fatal to a run.
    async fn insert(&self, record: BlacklistRecord) -> Result<(), BlacklistError>;

    /// Find all stored records matching each of the given hosts.
    async fn query(&self, hosts: &[String]) -> Result<Vec<QueryResult>, BlacklistError>;
}
