//! # Integration Tests
//!
//! End-to-end tests across the workspace crates, no network access:
//! - file-backed custom feed through the full pipeline
//! - orchestrator state machine against a real store
//! - zip container decoding composed with the archive feed grammar
//! - configuration to registry wiring

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::sync::Arc;

    use contracts::{CustomFeedConfig, HostStore};
    use feeds::CustomSource;
    use pipeline::run_source;
    use storage::MemoryStore;

    fn file_feed(lines: &str) -> (tempfile::NamedTempFile, CustomSource) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file.flush().unwrap();

        let source = CustomSource::from_config(&CustomFeedConfig {
            location: file.path().to_string_lossy().into_owned(),
            valid_days: Some("30".to_string()),
            name: Some("file-feed".to_string()),
        })
        .unwrap();

        (file, source)
    }

    /// Full pipeline over a local file: one good line, one comment, one
    /// short line.
    #[tokio::test]
    async fn test_file_feed_pipeline() {
        let (_file, source) = file_feed("a,1.2.3.4,US\n#comment\nbad\n");
        let store = Arc::new(MemoryStore::new());

        let stats = run_source(&source, store.clone()).await.unwrap();

        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.parsed, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.inserted, 1);

        let results = store.query(&["1.2.3.4".to_string()]).await.unwrap();
        assert_eq!(results[0].results.len(), 1);
        let record = &results[0].results[0];
        assert_eq!(record.source, "file-feed");
        assert_eq!(record.info["host"], "a");
    }

    /// A feed whose file vanished behaves like any other transport failure:
    /// the run errors, the consumer terminates, nothing is inserted.
    #[tokio::test]
    async fn test_missing_file_feed_aborts_cleanly() {
        let source = CustomSource::from_config(&CustomFeedConfig {
            location: "/nonexistent/feed.csv".to_string(),
            valid_days: None,
            name: Some("ghost".to_string()),
        })
        .unwrap();
        let store = Arc::new(MemoryStore::new());

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            run_source(&source, store.clone()),
        )
        .await
        .expect("pipeline deadlocked");

        assert!(result.is_err());
        assert_eq!(store.record_count(), 0);
    }

    /// Backpressure sanity: a feed much larger than the channel depth runs
    /// to completion with every record delivered in order.
    #[tokio::test]
    async fn test_large_feed_is_fully_delivered() {
        let lines: String = (0..500).map(|i| format!("host{i},10.0.0.{i}\n")).collect();
        let (_file, source) = file_feed(&lines);
        let store = Arc::new(MemoryStore::new());

        let stats = run_source(&source, store.clone()).await.unwrap();
        assert_eq!(stats.parsed, 500);
        assert_eq!(stats.inserted, 500);
        assert_eq!(store.record_count(), 500);
    }
}

#[cfg(test)]
mod orchestrator_tests {
    use std::io::Write;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Duration;
    use contracts::{
        BlacklistError, BlacklistRecord, CustomFeedConfig, FeedSource, HostStore, LineStream,
        ParseError, SourceMetadata,
    };
    use feeds::CustomSource;
    use pipeline::{RefreshOutcome, Refresher};
    use storage::MemoryStore;

    /// Source whose fetch always fails.
    struct BrokenSource;

    #[async_trait]
    impl FeedSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn origin(&self) -> &str {
            "http://broken.example/feed"
        }

        fn validity_window(&self) -> Duration {
            Duration::days(1)
        }

        async fn fetch(&self) -> Result<LineStream, BlacklistError> {
            Err(BlacklistError::fetch("broken", "connection refused"))
        }

        fn parse_line(&self, _: &str) -> Result<BlacklistRecord, ParseError> {
            Err(ParseError::MissingField)
        }
    }

    fn sources_from(source: impl FeedSource + 'static) -> Vec<Box<dyn FeedSource>> {
        vec![Box::new(source)]
    }

    #[tokio::test]
    async fn test_refresh_then_skip_while_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a,1.2.3.4\n").unwrap();
        file.flush().unwrap();

        let source = CustomSource::from_config(&CustomFeedConfig {
            location: file.path().to_string_lossy().into_owned(),
            valid_days: Some("30".to_string()),
            name: Some("cycling".to_string()),
        })
        .unwrap();
        let sources = sources_from(source);

        let store = Arc::new(MemoryStore::new());
        let refresher = Refresher::new(store.clone());

        // First cycle refreshes and registers metadata.
        let summary = refresher.refresh_all(&sources).await;
        assert_eq!(summary.refreshed(), 1);
        let meta = store.metadata("cycling").await.unwrap().unwrap();
        assert!(meta.last_update > 0);
        assert_eq!(store.record_count(), 1);

        // Second cycle finds the data still valid and skips.
        let summary = refresher.refresh_all(&sources).await;
        assert_eq!(summary.fresh(), 1);
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_metadata_for_retry() {
        let store = Arc::new(MemoryStore::new());
        let refresher = Refresher::new(store.clone());
        let sources = sources_from(BrokenSource);

        let summary = refresher.refresh_all(&sources).await;
        assert_eq!(summary.failed(), 1);
        assert!(matches!(
            summary.outcomes[0].1,
            RefreshOutcome::Failed(_)
        ));

        // The fresh metadata written before the run must be gone again, so
        // the next cycle retries.
        assert!(store.metadata("broken").await.unwrap().is_none());
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_source_is_purged_before_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a,1.2.3.4\n").unwrap();
        file.flush().unwrap();

        let source = CustomSource::from_config(&CustomFeedConfig {
            location: file.path().to_string_lossy().into_owned(),
            valid_days: Some("30".to_string()),
            name: Some("purging".to_string()),
        })
        .unwrap();
        let sources = sources_from(source);

        let store = Arc::new(MemoryStore::new());

        // Seed stale state: old records and epoch metadata.
        store
            .insert(BlacklistRecord {
                host: "9.9.9.9".to_string(),
                source: "purging".to_string(),
                info: serde_json::json!({}),
            })
            .await
            .unwrap();
        store
            .register(SourceMetadata::never("purging", "anywhere"))
            .await
            .unwrap();

        let refresher = Refresher::new(store.clone());
        refresher.refresh_all(&sources).await;

        // The stale record is gone, replaced by the feed's content.
        let old = store.query(&["9.9.9.9".to_string()]).await.unwrap();
        assert!(old[0].results.is_empty());
        let new = store.query(&["1.2.3.4".to_string()]).await.unwrap();
        assert_eq!(new[0].results.len(), 1);
    }
}

#[cfg(test)]
mod archive_tests {
    use std::io::{Seek, Write};

    use contracts::FeedSource;
    use feeds::MyIpMsSource;
    use futures::StreamExt;
    use zip::write::SimpleFileOptions;

    /// Zip container decoding composed with the archive feed's grammar.
    #[tokio::test]
    async fn test_zip_feed_lines_parse() {
        let tmp = tempfile::tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(tmp);
        writer
            .start_file("blacklist.txt".to_string(), SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(b"# full blacklist\n1.2.3.4 # 2000-01-02, 4.3.2.1, USA, 1\n5.6.7.8 # 2000-01-03, -, DEU, junk\n")
            .unwrap();
        let mut file = writer.finish().unwrap();
        file.rewind().unwrap();

        let source = MyIpMsSource::new();
        let mut lines = ingestion::zip_lines(file);

        let mut parsed = 0;
        let mut rejected = 0;
        while let Some(line) = lines.next().await {
            match source.parse_line(&line.unwrap()) {
                Ok(record) => {
                    parsed += 1;
                    assert!(!record.host.is_empty());
                }
                Err(_) => rejected += 1,
            }
        }

        assert_eq!(parsed, 2);
        assert_eq!(rejected, 1);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::FeedSource;
    use feeds::SourceRegistry;

    /// Configuration flows into the registry: resolvable entries register,
    /// the rest are dropped.
    #[test]
    fn test_config_to_registry() {
        let toml = r#"
[feeds]
use_custom = true

[[feeds.custom]]
location = "/var/feeds/internal.csv"
valid_days = "7"
name = "internal"

[[feeds.custom]]
location = "ftp://feeds.example/rejected.csv"
name = "rejected"
"#;
        let config = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        let registry = SourceRegistry::standard(&config);

        let names: Vec<&str> = registry.sources().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["Malware Domain List", "myip-ms", "internal"]
        );
    }
}
