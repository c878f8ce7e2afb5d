//! Source tree operations

use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::file::{Contents, FileDescriptor, FileStat};

/// What kind of entry was found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Directory,
    Symlink,
}

/// One entry discovered under a source root
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub root: PathBuf,
    pub path: PathBuf,
    pub kind: SourceKind,
    pub mode: Option<u32>,
}

impl SourceEntry {
    pub fn relative(&self) -> &Path {
        self.path.strip_prefix(&self.root).unwrap_or(&self.path)
    }

    /// Opens the entry and turns it into a descriptor.
    ///
    /// Regular files are read into memory when `buffer` is set and streamed
    /// otherwise.
    pub async fn into_descriptor(self, buffer: bool) -> io::Result<FileDescriptor> {
        let contents = match self.kind {
            SourceKind::File if buffer => Contents::Buffer(tokio::fs::read(&self.path).await?),
            SourceKind::File => Contents::Stream(Box::new(tokio::fs::File::open(&self.path).await?)),
            SourceKind::Directory => Contents::Directory,
            SourceKind::Symlink => Contents::Symlink(tokio::fs::read_link(&self.path).await?),
        };

        let mut file = FileDescriptor::with_base(self.root, self.path, contents);
        if let Some(mode) = self.mode {
            file = file.stat(FileStat::with_mode(mode));
        }
        Ok(file)
    }
}

/// Lists every entry under `root`. Directories always precede their contents.
pub async fn read_tree(root: &Path) -> io::Result<Vec<SourceEntry>> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || walk_tree(&root))
        .await
        .map_err(io::Error::other)?
}

fn walk_tree(root: &Path) -> io::Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            SourceKind::Symlink
        } else if file_type.is_dir() {
            SourceKind::Directory
        } else {
            SourceKind::File
        };

        debug!("Found {:?} {}", kind, entry.path().display());
        let metadata = entry.metadata()?;
        entries.push(SourceEntry {
            root: root.to_path_buf(),
            mode: permission_bits(&metadata, kind),
            path: entry.into_path(),
            kind,
        });
    }

    Ok(entries)
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata, kind: SourceKind) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    match kind {
        SourceKind::Symlink => None,
        _ => Some(metadata.permissions().mode() & 0o7777),
    }
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &std::fs::Metadata, _kind: SourceKind) -> Option<u32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_tree_lists_nested_entries() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        std::fs::write(tmp.path().join("a/b/c.txt"), b"c").unwrap();
        std::fs::write(tmp.path().join("top.txt"), b"t").unwrap();

        let entries = read_tree(tmp.path()).await.unwrap();
        let relative: Vec<_> = entries.iter().map(|e| e.relative().to_path_buf()).collect();

        assert_eq!(relative.len(), 4);
        let dir_a = relative.iter().position(|p| p == Path::new("a")).unwrap();
        let dir_b = relative.iter().position(|p| p == Path::new("a/b")).unwrap();
        let file_c = relative.iter().position(|p| p == Path::new("a/b/c.txt")).unwrap();
        assert!(dir_a < dir_b && dir_b < file_c);
        assert!(relative.contains(&PathBuf::from("top.txt")));
    }

    #[tokio::test]
    async fn test_into_descriptor_buffers_contents() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("f.txt"), b"body").unwrap();

        let entries = read_tree(tmp.path()).await.unwrap();
        let file = entries[0].clone().into_descriptor(true).await.unwrap();

        assert_eq!(file.relative(), Path::new("f.txt"));
        assert!(matches!(&file.contents, Contents::Buffer(bytes) if bytes == b"body"));
        #[cfg(unix)]
        assert!(file.mode().is_some());
    }
}
