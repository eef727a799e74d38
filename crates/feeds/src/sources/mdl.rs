//! Malware Domain List - quoted 9-field CSV over HTTP

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;
use url::Url;

use contracts::{BlacklistError, BlacklistRecord, FeedSource, LineStream, ParseError};

use crate::sources::strip_whitespace;

/// Feed endpoint
const MDL_URL: &str = "http://www.malwaredomainlist.com/mdlcsv.php";

/// Data older than a year must be re-fetched
const VALID_DAYS: i64 = 365;

/// Malware Domain List source.
///
/// Records are lines of nine quoted, comma-separated fields: date, hostname,
/// ip, reverse lookup, description, registrant, asn, inactive flag, country.
#[derive(Default)]
pub struct MdlSource;

impl MdlSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeedSource for MdlSource {
    fn name(&self) -> &str {
        "Malware Domain List"
    }

    fn origin(&self) -> &str {
        MDL_URL
    }

    fn validity_window(&self) -> Duration {
        Duration::days(VALID_DAYS)
    }

    async fn fetch(&self) -> Result<LineStream, BlacklistError> {
        let url =
            Url::parse(MDL_URL).map_err(|e| BlacklistError::fetch(self.name(), e.to_string()))?;
        ingestion::fetch_lines(&url)
            .await
            .map_err(|e| BlacklistError::fetch(self.name(), e.to_string()))
    }

    fn parse_line(&self, line: &str) -> Result<BlacklistRecord, ParseError> {
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let stripped = strip_whitespace(line);

        // Every data line opens with a quote, so the comment marker sits at
        // byte 1, not byte 0.
        if stripped.as_bytes().get(1) == Some(&b'#') {
            return Err(ParseError::CommentLine);
        }

        // Splitting on the quoted delimiter tolerates commas inside fields
        // and leaves interior fields already unquoted.
        let fields: Vec<&str> = stripped.split("\",\"").collect();
        if fields.len() < 9 {
            return Err(ParseError::MissingField);
        }

        let host = fields[2];
        if host.is_empty() {
            return Err(ParseError::MissingField);
        }

        let mut secondary = fields[1];
        if secondary == "-" {
            // No hostname on record; carry the ip instead.
            secondary = host;
        }

        Ok(BlacklistRecord {
            host: host.to_string(),
            source: self.name().to_string(),
            info: json!({
                "date": fields[0].trim_start_matches('"'),
                "host": secondary,
                "country": fields[8].trim_end_matches('"'),
                "blacklist_id": -1,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let source = MdlSource::new();
        let line = r#""2001/01/02_00:00","-","1.2.3.4","-","Trojan","-","33314","0","US","#;

        let record = source.parse_line(line).unwrap();
        assert_eq!(record.host, "1.2.3.4");
        assert_eq!(record.source, "Malware Domain List");
        // Missing hostname falls back to the ip.
        assert_eq!(record.info["host"], "1.2.3.4");
        assert_eq!(record.info["date"], "2001/01/02_00:00");
        assert_eq!(record.info["blacklist_id"], -1);
    }

    #[test]
    fn test_parse_line_with_hostname() {
        let source = MdlSource::new();
        let line =
            r#""2001/01/02_00:00","url.com","1.2.3.4","-","Trojan","-","33314","0","US","#;

        let record = source.parse_line(line).unwrap();
        assert_eq!(record.host, "1.2.3.4");
        assert_eq!(record.info["host"], "url.com");
    }

    #[test]
    fn test_comment_flagged_on_second_byte() {
        let source = MdlSource::new();
        let line = r##""#2001/01/02_00:00","-","1.2.3.4","-","Trojan","-","33314","0","US""##;
        assert_eq!(source.parse_line(line), Err(ParseError::CommentLine));
    }

    #[test]
    fn test_short_line_is_missing_field() {
        let source = MdlSource::new();
        let line = r#""2001/01/02_00:00","-","1.2.3.4","-","Trojan","-","#;
        assert_eq!(source.parse_line(line), Err(ParseError::MissingField));
    }

    #[test]
    fn test_empty_line() {
        let source = MdlSource::new();
        assert_eq!(source.parse_line(""), Err(ParseError::EmptyLine));
    }

    #[test]
    fn test_whitespace_inside_fields_is_stripped() {
        let source = MdlSource::new();
        let line = "\"2001/01/02_00:00\" , \"-\" , \"1.2.3.4\" , \"-\" , \"Trojan\" , \"-\" , \"33314\" , \"0\" , \"US\"";
        let record = source.parse_line(line).unwrap();
        assert_eq!(record.host, "1.2.3.4");
    }

    #[test]
    fn test_is_stale_when_never_updated() {
        use contracts::SourceMetadata;

        let source = MdlSource::new();
        let meta = SourceMetadata::never(source.name(), source.origin());
        assert!(source.is_stale(&meta));
    }
}
