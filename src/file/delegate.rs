//! Custom write delegates
//!
//! A descriptor may carry its own writer, which replaces the default
//! filesystem dispatcher for that file.

use async_trait::async_trait;
use std::path::Path;

use crate::error::SinkError;
use crate::file::FileDescriptor;
use crate::resolve::ResolvedTarget;

/// Strategy for writing a resolved file somewhere other than the local filesystem
#[async_trait]
pub trait WriteDelegate: Send + Sync {
    /// Write `file` to `path`. The descriptor has already been updated with
    /// `target` and must be handed back on success.
    async fn write(
        &self,
        path: &Path,
        target: &ResolvedTarget,
        file: FileDescriptor,
    ) -> Result<FileDescriptor, SinkError>;
}
