//! FeedSource trait - feed capability abstraction
//!
//! Defines a unified interface for blacklist feeds, decoupling the refresh
//! pipeline from concrete transports and record grammars.

use std::io;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::Duration;
use futures::Stream;

use crate::{BlacklistError, BlacklistRecord, ParseError, SourceMetadata};

/// Lazy stream of raw feed lines.
///
/// An `Err` item mid-stream is treated like a fetch failure and aborts the
/// run for that source.
pub type LineStream = Pin<Box<dyn Stream<Item = io::Result<String>> + Send>>;

/// Feed capability trait
///
/// Implemented once per feed. A source encapsulates its transport and
/// container ([`fetch`](FeedSource::fetch)), its record grammar
/// ([`parse_line`](FeedSource::parse_line)), its identity
/// ([`name`](FeedSource::name)), and its refresh cadence
/// ([`validity_window`](FeedSource::validity_window)).
///
/// New feeds implement this trait and register into the source registry at
/// startup; nothing in the pipeline enumerates concrete formats.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Stable source name, used as the partition key in storage.
    fn name(&self) -> &str;

    /// Where the feed is fetched from (URL or local path).
    fn origin(&self) -> &str;

    /// How long previously fetched data stays valid.
    fn validity_window(&self) -> Duration;

    /// Whether the stored metadata is too old to trust.
    ///
    /// `last_update < 1` means the source was never refreshed and is stale
    /// regardless of the validity window.
    fn is_stale(&self, meta: &SourceMetadata) -> bool {
        meta.last_update < 1 || meta.age_seconds() > self.validity_window().num_seconds()
    }

    /// Open the feed and return a lazy stream of raw lines.
    ///
    /// Suspends on network/file I/O; nothing is buffered beyond the
    /// decoder's internal read buffer.
    async fn fetch(&self) -> Result<LineStream, BlacklistError>;

    /// Parse one raw line into a record, or classify why it was rejected.
    fn parse_line(&self, line: &str) -> Result<BlacklistRecord, ParseError>;

    /// Fresh metadata for this source, written after a successful refresh.
    fn metadata(&self) -> SourceMetadata {
        SourceMetadata::fresh(self.name(), self.origin())
    }
}
