//! rax-dest
//!
//! A streaming file sink: resolves where each incoming file belongs under a
//! destination directory and writes it there.

pub mod config;
pub mod error;
pub mod file;
pub mod resolve;
pub mod sink;
pub mod source;
pub mod storage;
pub mod utils;

pub use error::{ResolveError, SinkError};
pub use file::{Contents, FileDescriptor, FileStat, WriteDelegate};
pub use resolve::{BaseSpec, DestOptions, DestSpec, ExtDot, ResolvedTarget, WriteFlag};
pub use sink::Sink;
