//! Command implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use config_loader::{ConfigLoader, SyncConfig};
use contracts::{FeedSource, HostStore};
use feeds::SourceRegistry;
use pipeline::{RefreshOutcome, RefreshSummary, Refresher};
use storage::MemoryStore;

use crate::cli::{InfoArgs, LookupArgs, UpdateArgs, ValidateArgs};

/// Refresh every stale source and print the per-source summary.
pub async fn run_update(args: &UpdateArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    if let Some(port) = args.metrics_port {
        observability::init_metrics_only(port)?;
    }

    let registry = SourceRegistry::standard(&config);
    let store: Arc<dyn HostStore> = Arc::new(MemoryStore::new());

    let summary = refresh(&registry, &store).await;
    print_summary(&summary);
    Ok(())
}

/// Refresh stale sources, then query the given hosts.
pub async fn run_lookup(args: &LookupArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let registry = SourceRegistry::standard(&config);
    let store: Arc<dyn HostStore> = Arc::new(MemoryStore::new());

    let summary = refresh(&registry, &store).await;
    print_summary(&summary);

    let results = store.query(&args.hosts).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Parse and validate the configuration, without running anything.
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let config = ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("invalid configuration: {}", args.config.display()))?;

    println!(
        "Configuration OK: use_custom = {}, {} custom feed(s)",
        config.feeds.use_custom,
        config.feeds.custom.len()
    );
    Ok(())
}

/// List the resolved sources without fetching anything.
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let registry = SourceRegistry::standard(&config);

    println!("{} source(s) registered:", registry.len());
    for source in registry.sources() {
        println!(
            "  {} <- {} (valid for {} days)",
            source.name(),
            source.origin(),
            source.validity_window().num_days()
        );
    }
    Ok(())
}

/// Load configuration, tolerating a missing file.
///
/// The built-in feeds need no configuration, so a missing file just means
/// no custom sources.
fn load_config(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(SyncConfig::default());
    }
    ConfigLoader::load_from_path(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

async fn refresh(registry: &SourceRegistry, store: &Arc<dyn HostStore>) -> RefreshSummary {
    let refresher = Refresher::new(Arc::clone(store));
    refresher.refresh_all(registry.sources()).await
}

fn print_summary(summary: &RefreshSummary) {
    println!("\nRefresh summary:");
    for (name, outcome) in &summary.outcomes {
        match outcome {
            RefreshOutcome::Fresh => println!("  {name}: still valid, skipped"),
            RefreshOutcome::Refreshed(stats) => println!(
                "  {name}: {} inserted ({} of {} lines parsed, {} rejected)",
                stats.inserted, stats.parsed, stats.total_lines, stats.rejected
            ),
            RefreshOutcome::Failed(err) => println!("  {name}: FAILED - {err}"),
        }
    }
}
