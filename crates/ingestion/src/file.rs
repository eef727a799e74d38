//! Local file transport - streams a file as lines

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;

use contracts::LineStream;

use crate::error::Result;

/// Open a local file and return its lines as a lazy stream.
pub async fn read_lines(path: &Path) -> Result<LineStream> {
    let file = File::open(path).await?;
    let reader = BufReader::new(file);
    Ok(Box::pin(LinesStream::new(reader.lines())))
}
