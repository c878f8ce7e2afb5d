//! Source tree reader
//!
//! Walks a directory on disk and produces descriptors for the sink.

mod operations;

pub use operations::{SourceEntry, SourceKind, read_tree};
