//! Zip container - streams every archived file as lines
//!
//! The zip central directory sits at the end of the payload, so callers
//! first land the archive in a seekable file (see
//! [`crate::download_to_file`]). Entries are then decoded on a blocking
//! thread and handed to the async side over a bounded channel, keeping the
//! stream lazy from the consumer's point of view.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;
use zip::ZipArchive;

use contracts::LineStream;

use crate::error::{IngestionError, Result};

/// Lines in flight between the blocking reader and the async consumer.
const CHANNEL_DEPTH: usize = 64;

/// Stream the lines of every file inside a zip archive.
///
/// `file` must be positioned at the start of a complete archive. Open and
/// decode failures surface as an `Err` item on the stream, which callers
/// treat like any other transport failure.
pub fn zip_lines(file: File) -> LineStream {
    let (tx, rx) = mpsc::channel::<io::Result<String>>(CHANNEL_DEPTH);

    tokio::task::spawn_blocking(move || {
        if let Err(err) = read_entries(file, &tx) {
            // Receiver may already be gone; either way there is nothing
            // more to read.
            let _ = tx.blocking_send(Err(io::Error::other(err.to_string())));
        }
    });

    Box::pin(ReceiverStream::new(rx))
}

fn read_entries(file: File, tx: &mpsc::Sender<io::Result<String>>) -> Result<()> {
    let mut archive = ZipArchive::new(file).map_err(|e| IngestionError::archive(e.to_string()))?;

    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| IngestionError::archive(e.to_string()))?;
        debug!(entry = entry.name(), "reading archive entry");

        let reader = BufReader::new(entry);
        for line in reader.lines() {
            if tx.blocking_send(Ok(line?)).is_err() {
                // Consumer hung up; stop decoding.
                return Ok(());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_archive(entries: &[(&str, &str)]) -> File {
        let tmp = tempfile::tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(tmp);
        for (name, content) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let mut file = writer.finish().unwrap();
        use std::io::Seek;
        file.rewind().unwrap();
        file
    }

    async fn collect(mut lines: LineStream) -> Vec<io::Result<String>> {
        let mut collected = Vec::new();
        while let Some(line) = lines.next().await {
            collected.push(line);
        }
        collected
    }

    #[tokio::test]
    async fn test_zip_lines_spans_all_entries() {
        let file = build_archive(&[("a.txt", "one\ntwo\n"), ("b.txt", "three\n")]);

        let lines = collect(zip_lines(file)).await;
        let lines: Vec<String> = lines.into_iter().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_zip_lines_bad_archive_yields_error() {
        let mut tmp = tempfile::tempfile().unwrap();
        tmp.write_all(b"this is not a zip archive").unwrap();
        use std::io::Seek;
        tmp.rewind().unwrap();

        let lines = collect(zip_lines(tmp)).await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_err());
    }
}
