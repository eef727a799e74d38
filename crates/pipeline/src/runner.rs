//! Two-stage concurrent refresh engine
//!
//! One producer (fetch + parse) and one consumer (store insert) per source,
//! joined by a rendezvous channel. The channel is the backpressure
//! mechanism: capacity 1 keeps at most one parsed record in flight, so the
//! producer cannot outrun the store's insert throughput and the consumer
//! cannot run ahead of the feed.

use std::sync::Arc;

use futures::StreamExt;
use metrics::counter;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, trace, warn};

use contracts::{BlacklistError, BlacklistRecord, FeedSource, HostStore};

use crate::stats::RunStats;

/// Run one source's refresh pipeline to completion.
///
/// Blocks until the producer has drained the feed, closes the channel by
/// dropping the sender, then waits for the consumer. Channel closure is the
/// consumer's only end-of-stream signal.
///
/// A fetch-level error aborts the producer; the sender is dropped on the
/// way out, so the consumer always terminates. Records already handed over
/// stay in the store - there is no rollback.
#[instrument(name = "pipeline_run_source", skip_all, fields(source = source.name()))]
pub async fn run_source(
    source: &dyn FeedSource,
    store: Arc<dyn HostStore>,
) -> Result<RunStats, BlacklistError> {
    let (tx, rx) = mpsc::channel::<BlacklistRecord>(1);

    let consumer = tokio::spawn(consume(rx, store, source.name().to_string()));

    let produced = produce(source, tx).await;

    // The sender went into `produce` and is gone by now, so the consumer
    // sees end-of-stream even when production failed.
    let inserted = consumer
        .await
        .map_err(|e| BlacklistError::store(e.to_string()))?;

    let mut stats = produced?;
    stats.inserted = inserted;
    Ok(stats)
}

/// Fetch, parse, and hand records to the consumer one at a time.
async fn produce(
    source: &dyn FeedSource,
    tx: mpsc::Sender<BlacklistRecord>,
) -> Result<RunStats, BlacklistError> {
    let mut lines = source.fetch().await?;
    let mut stats = RunStats::default();

    while let Some(line) = lines.next().await {
        let line = line.map_err(|e| BlacklistError::fetch(source.name(), e.to_string()))?;
        stats.total_lines += 1;

        match source.parse_line(&line) {
            Ok(record) => {
                stats.parsed += 1;
                if tx.send(record).await.is_err() {
                    return Err(BlacklistError::store("record consumer stopped early"));
                }
            }
            Err(reason) => {
                stats.rejected += 1;
                counter!("lines_rejected_total").increment(1);
                trace!(source = source.name(), %reason, %line, "rejected line");
            }
        }
    }

    if stats.total_lines == 0 {
        warn!(
            source = source.name(),
            "feed produced no lines, possible transport failure"
        );
    } else {
        info!(
            source = source.name(),
            "parsed {} of {} lines", stats.parsed, stats.total_lines
        );
    }

    Ok(stats)
}

/// Drain the channel into the store until the producer closes it.
async fn consume(
    mut rx: mpsc::Receiver<BlacklistRecord>,
    store: Arc<dyn HostStore>,
    source: String,
) -> u64 {
    let mut inserted = 0u64;
    while let Some(record) = rx.recv().await {
        match store.insert(record).await {
            Ok(()) => {
                inserted += 1;
                counter!("records_inserted_total").increment(1);
            }
            Err(err) => {
                // Best effort per record; the run keeps going.
                error!(source = %source, error = %err, "insert failed, skipping record");
            }
        }
    }
    inserted
}
