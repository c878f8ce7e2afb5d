//! File descriptors
//!
//! In-memory records describing one file, directory or symlink to
//! materialize on disk.

mod contents;
mod delegate;
mod descriptor;

pub use contents::{ByteStream, Contents};
pub use delegate::WriteDelegate;
pub use descriptor::{FileDescriptor, FileStat};
