//! # Ingestion
//!
//! Transport and container decoders for feed data.
//!
//! Responsibilities:
//! - Turn an HTTP response body into a lazy stream of lines
//! - Turn a local file into a lazy stream of lines
//! - Turn a zip archive into a lazy stream of lines across all entries
//! - Stream a download into a scratch file for containers that need seeking
//!
//! Every decoder produces the shared [`contracts::LineStream`] shape, so a
//! feed source composes transport and grammar freely. Nothing here buffers
//! a whole feed in memory; peak usage is a read buffer plus whatever the
//! caller holds.

mod archive;
mod error;
mod file;
mod http;

pub use archive::zip_lines;
pub use error::{IngestionError, Result};
pub use file::read_lines;
pub use http::{download_to_file, fetch_lines};
