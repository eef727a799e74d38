//! Blacklist record types

use serde::{Deserialize, Serialize};

/// One normalized blacklisted-host entry.
///
/// `host` is the canonical identifier matched on lookup — an IP or a domain,
/// depending on which feed produced it. `info` carries source-specific
/// auxiliary fields (date seen, country, secondary hostname, numeric
/// blacklist id) as an opaque bag; only the owning source's formatting logic
/// gives it shape, nothing downstream interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistRecord {
    /// Canonical blacklisted host. Never empty for a parsed record.
    pub host: String,

    /// Name of the source that produced this record.
    ///
    /// Used as the partition key in storage.
    pub source: String,

    /// Source-specific auxiliary fields.
    pub info: serde_json::Value,
}

/// Result of a blacklist lookup for a single host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The host that was looked up
    pub host: String,
    /// Every stored record matching it, across all sources
    pub results: Vec<BlacklistRecord>,
}
