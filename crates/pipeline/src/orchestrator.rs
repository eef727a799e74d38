//! Refresh orchestrator - the per-source decision state machine
//!
//! Per source and per cycle: check validity → skip, or purge → register →
//! run pipeline. Sources are processed strictly one after another;
//! concurrency lives only inside each source's producer/consumer pair.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, error, info, instrument};

use contracts::{BlacklistError, FeedSource, HostStore, SourceMetadata};

use crate::runner::run_source;
use crate::stats::{RefreshOutcome, RefreshSummary};

/// Drives refresh cycles against a set of sources.
pub struct Refresher {
    store: Arc<dyn HostStore>,
}

impl Refresher {
    /// Create a refresher writing into the given store.
    pub fn new(store: Arc<dyn HostStore>) -> Self {
        Self { store }
    }

    /// Run one refresh cycle over the given sources.
    ///
    /// Failures are contained per source: a failed refresh leaves that
    /// source stale for the next cycle and moves on to the next one.
    #[instrument(name = "refresh_cycle", skip_all, fields(sources = sources.len()))]
    pub async fn refresh_all(&self, sources: &[Box<dyn FeedSource>]) -> RefreshSummary {
        let mut summary = RefreshSummary::default();
        for source in sources {
            let outcome = self.refresh_one(source.as_ref()).await;
            summary.outcomes.push((source.name().to_string(), outcome));
        }

        info!(
            refreshed = summary.refreshed(),
            fresh = summary.fresh(),
            failed = summary.failed(),
            "refresh cycle complete"
        );
        summary
    }

    async fn refresh_one(&self, source: &dyn FeedSource) -> RefreshOutcome {
        let name = source.name();

        let meta = match self.store.metadata(name).await {
            Ok(meta) => meta.unwrap_or_else(|| SourceMetadata::never(name, source.origin())),
            Err(err) => {
                error!(source = name, error = %err, "metadata lookup failed");
                return RefreshOutcome::Failed(err.to_string());
            }
        };

        if !source.is_stale(&meta) {
            debug!(
                source = name,
                last_update = meta.last_update,
                "still valid, skipping"
            );
            return RefreshOutcome::Fresh;
        }

        if let Err(err) = self.prepare(source).await {
            error!(source = name, error = %err, "purge/register failed");
            return RefreshOutcome::Failed(err.to_string());
        }

        match run_source(source, Arc::clone(&self.store)).await {
            Ok(stats) => {
                counter!("sources_refreshed_total").increment(1);
                info!(source = name, inserted = stats.inserted, "source refreshed");
                RefreshOutcome::Refreshed(stats)
            }
            Err(err) => {
                error!(source = name, error = %err, "refresh failed");
                // Clear the metadata written in `prepare` so the next cycle
                // still sees this source as stale and retries.
                if let Err(purge_err) = self.store.remove_source(name).await {
                    error!(
                        source = name,
                        error = %purge_err,
                        "failed to clear metadata after aborted run"
                    );
                }
                RefreshOutcome::Failed(err.to_string())
            }
        }
    }

    /// Purge previous data for this source, then write fresh metadata.
    ///
    /// Registration is store-guarded: it only lands when no metadata with
    /// this name exists, so a concurrent writer cannot duplicate rows.
    async fn prepare(&self, source: &dyn FeedSource) -> Result<(), BlacklistError> {
        self.store.remove_source(source.name()).await?;
        self.store.register(source.metadata()).await
    }
}
