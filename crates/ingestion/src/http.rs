//! HTTP transport - streams a response body as lines

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_util::io::StreamReader;
use tracing::debug;
use url::Url;

use contracts::LineStream;

use crate::error::{IngestionError, Result};

/// How long to wait for the TCP/TLS handshake. The body transfer itself is
/// not bounded; a stalled feed holds its refresh until the transport errors.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the client used for a single feed fetch.
fn feed_client(url: &Url) -> Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("blacklist-syncer/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| IngestionError::request(url.as_str(), e.to_string()))
}

/// Open `url` and return the response body as a lazy stream of lines.
///
/// The body is decoded incrementally: each poll pulls at most one buffered
/// chunk off the socket.
pub async fn fetch_lines(url: &Url) -> Result<LineStream> {
    let response = send(url).await?;

    let body = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(std::io::Error::other));
    let reader = BufReader::new(StreamReader::new(body));

    Ok(Box::pin(LinesStream::new(reader.lines())))
}

/// Download `url` into `dest`, chunk by chunk.
///
/// Used for containers (zip) whose index sits at the end of the payload and
/// therefore need a seekable copy before decoding. Returns the byte count.
pub async fn download_to_file(url: &Url, dest: &mut tokio::fs::File) -> Result<u64> {
    let response = send(url).await?;

    let mut body = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| IngestionError::request(url.as_str(), e.to_string()))?;
        dest.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    dest.flush().await?;

    debug!(url = %url, bytes = written, "download complete");
    Ok(written)
}

async fn send(url: &Url) -> Result<reqwest::Response> {
    let client = feed_client(url)?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| IngestionError::request(url.as_str(), e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestionError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
