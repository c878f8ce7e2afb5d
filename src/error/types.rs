//! Error types
//!
//! Defines the error types raised while resolving and writing files.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Configuration errors detected while resolving a destination path.
///
/// These are raised before any filesystem access and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    InvalidDestination(String),
    InvalidBase(String),
    ExpandWithComputedDestination,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidDestination(d) => write!(f, "Invalid output folder: {:?}", d),
            ResolveError::InvalidBase(b) => write!(f, "Invalid base option: {:?}", b),
            ResolveError::ExpandWithComputedDestination => {
                write!(f, "The expand option requires a literal destination path")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Errors surfaced by the sink for a single file
#[derive(Debug)]
pub enum SinkError {
    Resolve(ResolveError),
    Io { path: PathBuf, source: io::Error },
    Delegate(String),
}

impl SinkError {
    /// Wraps an I/O failure together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SinkError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the error came from option/path validation
    pub fn is_configuration(&self) -> bool {
        matches!(self, SinkError::Resolve(_))
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Resolve(e) => write!(f, "Configuration error: {}", e),
            SinkError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            SinkError::Delegate(msg) => write!(f, "Write delegate failed: {}", msg),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Resolve(e) => Some(e),
            SinkError::Io { source, .. } => Some(source),
            SinkError::Delegate(_) => None,
        }
    }
}

impl From<ResolveError> for SinkError {
    fn from(error: ResolveError) -> Self {
        SinkError::Resolve(error)
    }
}
