//! File sink
//!
//! Per-file pipeline: option merge, path resolution, write.

pub mod core;
pub mod run;

pub use self::core::{Sink, SinkResult};
pub use run::{RunSummary, copy_tree};
