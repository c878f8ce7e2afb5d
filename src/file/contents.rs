//! File contents
//!
//! The payload kinds a descriptor can carry.

use std::fmt;
use std::path::PathBuf;
use tokio::io::AsyncRead;

/// Boxed async byte source used for streamed contents
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Content carried by a [`FileDescriptor`](super::FileDescriptor)
pub enum Contents {
    /// In-memory bytes
    Buffer(Vec<u8>),
    /// An open readable byte stream
    Stream(ByteStream),
    /// Marker for a directory entry
    Directory,
    /// Symbolic link pointing at the given target
    Symlink(PathBuf),
    /// No content; path-only record
    Null,
}

impl Contents {
    pub fn is_buffer(&self) -> bool {
        matches!(self, Contents::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Contents::Stream(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Contents::Directory)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Contents::Symlink(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Contents::Null)
    }

    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Contents::Buffer(_) => "buffer",
            Contents::Stream(_) => "stream",
            Contents::Directory => "directory",
            Contents::Symlink(_) => "symlink",
            Contents::Null => "null",
        }
    }
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Contents::Stream(_) => write!(f, "Stream"),
            Contents::Directory => write!(f, "Directory"),
            Contents::Symlink(target) => write!(f, "Symlink({})", target.display()),
            Contents::Null => write!(f, "Null"),
        }
    }
}
