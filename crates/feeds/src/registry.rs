//! Process-wide source registry

use contracts::{FeedSource, SyncConfig};
use tracing::{info, warn};

use crate::sources::{CustomSource, MdlSource, MyIpMsSource};

/// Append-only list of the feed sources available to the orchestrator.
///
/// Built once at process start and passed by reference. Registration order
/// is refresh order; no correctness property depends on it.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn FeedSource>>,
}

impl SourceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in feeds plus any configured custom
    /// feeds.
    ///
    /// Custom entries whose location cannot be classified are dropped with
    /// a diagnostic and never retried.
    pub fn standard(config: &SyncConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MdlSource::new()));
        registry.register(Box::new(MyIpMsSource::new()));

        if config.feeds.use_custom {
            for entry in &config.feeds.custom {
                match CustomSource::from_config(entry) {
                    Ok(source) => registry.register(Box::new(source)),
                    Err(err) => warn!(
                        location = %entry.location,
                        error = %err,
                        "dropping custom feed with unresolvable location"
                    ),
                }
            }
        }

        registry
    }

    /// Add a source to the registry.
    pub fn register(&mut self, source: Box<dyn FeedSource>) {
        info!(source = source.name(), "registered feed source");
        self.sources.push(source);
    }

    /// Registered sources, in registration order.
    pub fn sources(&self) -> &[Box<dyn FeedSource>] {
        &self.sources
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry holds no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
