//! # Storage
//!
//! In-process implementation of the `HostStore` boundary.
//!
//! The synchronizer treats persistent storage as an external collaborator
//! behind [`contracts::HostStore`]; this crate provides the implementation
//! used by the CLI's single-process refresh-then-lookup flow and by the
//! test suites.

mod memory;

pub use memory::MemoryStore;
