//! MyIP.ms full blacklist - hash-delimited entries inside a zip archive

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;
use tracing::debug;
use url::Url;

use contracts::{BlacklistError, BlacklistRecord, FeedSource, LineStream, ParseError};

use crate::sources::strip_whitespace;

/// Feed endpoint
const MYIPMS_URL: &str = "https://myip.ms/files/blacklist/general/full_blacklist_database.zip";

/// The upstream database is republished frequently; data older than eight
/// days must be re-fetched
const VALID_DAYS: i64 = 8;

/// MyIP.ms blacklist source.
///
/// The feed ships as a zip archive. Each entry line reads
/// `ip # date # hostname # country # blacklist-id`, with tabs padding the
/// `#` separators.
#[derive(Default)]
pub struct MyIpMsSource;

impl MyIpMsSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeedSource for MyIpMsSource {
    fn name(&self) -> &str {
        "myip-ms"
    }

    fn origin(&self) -> &str {
        MYIPMS_URL
    }

    fn validity_window(&self) -> Duration {
        Duration::days(VALID_DAYS)
    }

    async fn fetch(&self) -> Result<LineStream, BlacklistError> {
        let url = Url::parse(MYIPMS_URL)
            .map_err(|e| BlacklistError::fetch(self.name(), e.to_string()))?;

        // The zip index sits at the end of the payload, so the archive
        // lands in an unlinked scratch file before any entry is decoded.
        let scratch = tempfile::NamedTempFile::new()?;
        let reader = scratch.reopen()?;

        let mut dest = tokio::fs::File::from_std(scratch.as_file().try_clone()?);
        let written = ingestion::download_to_file(&url, &mut dest)
            .await
            .map_err(|e| BlacklistError::fetch(self.name(), e.to_string()))?;
        debug!(source = self.name(), bytes = written, "archive downloaded");

        // `reader` keeps its own descriptor, so the stream outlives the
        // scratch path once `scratch` drops and unlinks it.
        Ok(ingestion::zip_lines(reader))
    }

    fn parse_line(&self, line: &str) -> Result<BlacklistRecord, ParseError> {
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let stripped = strip_whitespace(line);
        if stripped.starts_with('#') {
            return Err(ParseError::CommentLine);
        }

        // Entries separate fields with `#`; normalize to commas first.
        let normalized = stripped.replace('#', ",");
        let fields: Vec<&str> = normalized.split(',').collect();
        if fields.len() < 5 {
            return Err(ParseError::MissingField);
        }

        let host = fields[0];
        if host.is_empty() {
            return Err(ParseError::MissingField);
        }

        // A non-numeric id is data noise, not an error.
        let blacklist_id = fields[4].parse::<i64>().unwrap_or(-1);

        Ok(BlacklistRecord {
            host: host.to_string(),
            source: self.name().to_string(),
            info: json!({
                "date": fields[1],
                "host": fields[2],
                "country": fields[3],
                "blacklist_id": blacklist_id,
            }),
        })
    }
}
