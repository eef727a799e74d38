//! User-configured CSV feeds

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;
use tracing::warn;

use contracts::{
    BlacklistError, BlacklistRecord, CustomFeedConfig, FeedSource, LineStream, Origin, ParseError,
};

use crate::sources::strip_whitespace;

/// Window applied when `valid_days` is unset or unparseable. Large enough
/// that the feed effectively never expires.
const DEFAULT_VALID_DAYS: f64 = 36500.0;

/// Placeholder for a missing domain or ip side.
const MISSING: &str = "-";

/// One feed described in the configuration file.
///
/// Lines are comma-separated `domain,ip[,country,...]`; either side of the
/// domain/ip pair may be empty, but not both.
pub struct CustomSource {
    name: String,
    location: String,
    origin: Origin,
    valid_days: f64,
}

impl CustomSource {
    /// Build a source from one configuration entry.
    ///
    /// Fails when the location cannot be classified as a URL or a file
    /// path; the caller drops the entry.
    pub fn from_config(config: &CustomFeedConfig) -> Result<Self, BlacklistError> {
        let origin = Origin::resolve(&config.location)?;

        let valid_days = match config.valid_days.as_deref() {
            None | Some("") => DEFAULT_VALID_DAYS,
            Some(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
                warn!(
                    location = %config.location,
                    valid_days = raw,
                    "unparseable validity window, treating feed as never expiring"
                );
                DEFAULT_VALID_DAYS
            }),
        };

        Ok(Self {
            name: config.resolved_name().to_string(),
            location: config.location.clone(),
            origin,
            valid_days,
        })
    }
}

#[async_trait]
impl FeedSource for CustomSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &str {
        &self.location
    }

    fn validity_window(&self) -> Duration {
        Duration::seconds((self.valid_days * 86_400.0) as i64)
    }

    async fn fetch(&self) -> Result<LineStream, BlacklistError> {
        match &self.origin {
            Origin::Remote(url) => ingestion::fetch_lines(url)
                .await
                .map_err(|e| BlacklistError::fetch(&self.name, e.to_string())),
            Origin::LocalFile(path) => ingestion::read_lines(path)
                .await
                .map_err(|e| BlacklistError::fetch(&self.name, e.to_string())),
        }
    }

    fn parse_line(&self, line: &str) -> Result<BlacklistRecord, ParseError> {
        let stripped = strip_whitespace(line);
        if stripped.is_empty() {
            return Err(ParseError::EmptyLine);
        }
        if stripped.starts_with('#') {
            return Err(ParseError::CommentLine);
        }

        let fields: Vec<&str> = stripped.split(',').collect();
        if fields.len() < 2 {
            return Err(ParseError::MissingField);
        }

        let (domain, ip) = (fields[0], fields[1]);
        if domain.is_empty() && ip.is_empty() {
            return Err(ParseError::MissingField);
        }

        // One empty side gets the placeholder; the other becomes the host.
        let host = if ip.is_empty() { MISSING } else { ip };
        let secondary = if domain.is_empty() { MISSING } else { domain };

        let mut info = json!({ "host": secondary });
        if let Some(country) = fields.get(2).filter(|c| !c.is_empty()) {
            info["country"] = json!(country);
        }

        Ok(BlacklistRecord {
            host: host.to_string(),
            source: self.name.clone(),
            info,
        })
    }
}
