//! # Feeds
//!
//! Concrete blacklist feed sources and the registry handed to the
//! orchestrator.
//!
//! Built-in feeds:
//! - **Malware Domain List**: quoted 9-field CSV over HTTP
//! - **myip-ms**: tab/hash-delimited entries inside a zip archive
//!
//! Custom feeds come from configuration, one source per entry; entries
//! whose location cannot be classified are dropped at construction with a
//! diagnostic.

mod registry;
mod sources;

pub use registry::SourceRegistry;
pub use sources::{CustomSource, MdlSource, MyIpMsSource};
