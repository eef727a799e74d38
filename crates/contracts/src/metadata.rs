//! Per-source refresh metadata

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Refresh bookkeeping for one feed source, persisted in the host store.
///
/// Read before each refresh decision, written after a successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Source name, matches [`crate::FeedSource::name`]
    pub name: String,

    /// Where the feed is fetched from (URL or local path)
    pub origin: String,

    /// Unix seconds of the last successful refresh; 0 = never updated
    pub last_update: i64,

    /// Hash of the last fetched payload, if the source computes one
    pub content_hash: Option<String>,
}

impl SourceMetadata {
    /// Metadata for a source that has never been refreshed.
    pub fn never(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            last_update: 0,
            content_hash: None,
        }
    }

    /// Metadata stamped with the current time.
    pub fn fresh(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            last_update: Utc::now().timestamp(),
            ..Self::never(name, origin)
        }
    }

    /// Seconds elapsed since the last refresh.
    pub fn age_seconds(&self) -> i64 {
        Utc::now().timestamp() - self.last_update
    }
}
