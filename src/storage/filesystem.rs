//! File system primitives
//!
//! Directory creation, content writes and symlinks used by the dispatcher.

use std::io::{self, Result};
use std::path::Path;
use tokio::fs::{DirBuilder, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::file::ByteStream;
use crate::resolve::WriteFlag;

/// Create a directory and all missing ancestors.
///
/// Succeeds if the directory already exists, including when another writer
/// creates it concurrently.
pub async fn ensure_dir(path: &Path, mode: Option<u32>) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    if let Some(mode) = mode {
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    match builder.create(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && directory_exists(path).await => {
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Check if a directory exists
pub async fn directory_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

fn open_options(flag: WriteFlag, mode: Option<u32>) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true);
    match flag {
        WriteFlag::Overwrite => {
            options.create(true).truncate(true);
        }
        WriteFlag::Exclusive => {
            options.create_new(true);
        }
    }
    #[cfg(unix)]
    if let Some(mode) = mode {
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options
}

/// Write an in-memory buffer to `path`
pub async fn write_buffer(
    path: &Path,
    bytes: &[u8],
    flag: WriteFlag,
    mode: Option<u32>,
) -> Result<()> {
    let mut out = open_options(flag, mode).open(path).await?;
    out.write_all(bytes).await?;
    out.flush().await
}

/// Pipe `source` into `path`, returning the number of bytes copied
pub async fn write_stream(
    path: &Path,
    source: &mut ByteStream,
    flag: WriteFlag,
    mode: Option<u32>,
) -> Result<u64> {
    let mut out = open_options(flag, mode).open(path).await?;
    let copied = tokio::io::copy(source, &mut out).await?;
    out.flush().await?;
    Ok(copied)
}

/// Reopen a written file for downstream readers
pub async fn reopen(path: &Path) -> Result<ByteStream> {
    let file = File::open(path).await?;
    Ok(Box::new(file))
}

/// Read a whole stream into memory
pub async fn read_all(source: &mut ByteStream) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes).await?;
    Ok(bytes)
}

/// Create a symbolic link at `path` pointing to `target`
#[cfg(unix)]
pub async fn create_symlink(target: &Path, path: &Path) -> Result<()> {
    tokio::fs::symlink(target, path).await
}

#[cfg(windows)]
pub async fn create_symlink(target: &Path, path: &Path) -> Result<()> {
    tokio::fs::symlink_file(target, path).await
}

#[cfg(not(any(unix, windows)))]
pub async fn create_symlink(_target: &Path, _path: &Path) -> Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");

        ensure_dir(&nested, None).await.unwrap();
        ensure_dir(&nested, None).await.unwrap();
        assert!(directory_exists(&nested).await);
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        assert!(ensure_dir(&file, None).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_ensure_dir() {
        let tmp = tempdir().unwrap();
        let shared = tmp.path().join("shared/deep/tree");

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                tokio::spawn(async move { ensure_dir(&shared, None).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert!(directory_exists(&shared).await);
    }

    #[tokio::test]
    async fn test_exclusive_write_fails_on_existing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.txt");

        write_buffer(&path, b"one", WriteFlag::Exclusive, None).await.unwrap();
        let err = write_buffer(&path, b"two", WriteFlag::Exclusive, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        write_buffer(&path, b"three", WriteFlag::Overwrite, None).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"three");
    }

    #[tokio::test]
    async fn test_write_stream_and_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("s.bin");
        let mut source: ByteStream = Box::new(&b"streamed bytes"[..]);

        let copied = write_stream(&path, &mut source, WriteFlag::Overwrite, None)
            .await
            .unwrap();
        assert_eq!(copied, 14);

        let mut reopened = reopen(&path).await.unwrap();
        assert_eq!(read_all(&mut reopened).await.unwrap(), b"streamed bytes");
    }
}
