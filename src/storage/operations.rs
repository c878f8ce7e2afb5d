//! Write dispatch
//!
//! Materializes a resolved descriptor on disk: parent directories first,
//! then the content write, then permission reconciliation.

use log::{debug, info};
use std::io;
use std::path::Path;

use crate::error::SinkError;
use crate::error::handlers::is_exists_conflict;
use crate::file::{Contents, FileDescriptor};
use crate::resolve::ResolvedTarget;
use crate::storage::filesystem::{create_symlink, ensure_dir, reopen, write_buffer, write_stream};
use crate::storage::permissions::sync_mode;
use crate::storage::results::WriteOutcome;

/// Writes `file` to `path` according to `target`.
///
/// The descriptor is handed back on success. For streamed contents it then
/// carries a fresh reader over the written file.
pub async fn write_file(
    path: &Path,
    mut file: FileDescriptor,
    target: &ResolvedTarget,
) -> Result<(FileDescriptor, WriteOutcome), SinkError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent, target.dir_mode)
            .await
            .map_err(|e| SinkError::io(parent, e))?;
    }

    let outcome = match write_contents(path, &mut file, target).await {
        Ok(outcome) => outcome,
        Err(e) if is_exists_conflict(&e, target.flag) => {
            debug!("Keeping existing file {}", path.display());
            WriteOutcome::SkippedExisting
        }
        Err(e) => return Err(SinkError::io(path, e)),
    };

    if outcome.needs_mode_sync() {
        if let Some(mode) = target.mode {
            let changed = sync_mode(path, mode)
                .await
                .map_err(|e| SinkError::io(path, e))?;
            if changed {
                debug!("Reset mode of {} to {:o}", path.display(), mode);
            }
        }
    }

    info!(
        "Processed {} {} ({:?})",
        file.contents.kind(),
        path.display(),
        outcome
    );
    Ok((file, outcome))
}

async fn write_contents(
    path: &Path,
    file: &mut FileDescriptor,
    target: &ResolvedTarget,
) -> io::Result<WriteOutcome> {
    match &mut file.contents {
        Contents::Directory => {
            ensure_dir(path, target.mode).await?;
            Ok(WriteOutcome::Directory)
        }
        Contents::Stream(source) => {
            let bytes = write_stream(path, source, target.flag, target.mode).await?;
            file.contents = Contents::Stream(reopen(path).await?);
            Ok(WriteOutcome::Written { bytes })
        }
        Contents::Buffer(bytes) => {
            write_buffer(path, bytes, target.flag, target.mode).await?;
            Ok(WriteOutcome::Written {
                bytes: bytes.len() as u64,
            })
        }
        Contents::Symlink(link_target) => match create_symlink(link_target, path).await {
            Ok(()) => Ok(WriteOutcome::Linked),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!("Symlink {} already exists", path.display());
                Ok(WriteOutcome::Linked)
            }
            Err(e) => Err(e),
        },
        Contents::Null => Ok(WriteOutcome::Nothing),
    }
}
