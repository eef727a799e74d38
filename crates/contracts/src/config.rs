//! Synchronizer configuration types

use serde::{Deserialize, Serialize};

/// Top-level configuration consumed by the CLI and the registry builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Feed configuration
    #[serde(default)]
    pub feeds: FeedsConfig,
}

/// Feed-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Whether the entries in `custom` participate in refresh cycles
    #[serde(default)]
    pub use_custom: bool,

    /// Custom feed descriptors, one source each
    #[serde(default)]
    pub custom: Vec<CustomFeedConfig>,
}

/// One user-configured feed.
///
/// `valid_days` is a string to match the external schema; it is parsed at
/// source construction and falls back to the never-expires default when
/// absent or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFeedConfig {
    /// Feed location: HTTP(S) URL or local file path
    pub location: String,

    /// Validity window in days
    #[serde(default)]
    pub valid_days: Option<String>,

    /// Source name; defaults to the location when unset
    #[serde(default)]
    pub name: Option<String>,
}

impl CustomFeedConfig {
    /// Resolved source name.
    pub fn resolved_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.location,
        }
    }
}
