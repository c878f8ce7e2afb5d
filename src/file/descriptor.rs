//! File descriptor record

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::file::{Contents, WriteDelegate};
use crate::resolve::{DestOptions, ResolvedTarget, WriteFlag};

/// Subset of file metadata the sink cares about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    /// POSIX permission bits, `None` when there is no preference
    pub mode: Option<u32>,
}

impl FileStat {
    pub fn with_mode(mode: u32) -> Self {
        Self { mode: Some(mode) }
    }
}

/// One file flowing through the sink
pub struct FileDescriptor {
    pub cwd: PathBuf,
    pub base: PathBuf,
    pub path: PathBuf,
    pub contents: Contents,
    pub stat: Option<FileStat>,
    /// Per-file overrides, merged over the sink's global options
    pub options: Option<DestOptions>,
    pub delegate: Option<Arc<dyn WriteDelegate>>,
    pub flag: Option<WriteFlag>,
}

impl FileDescriptor {
    /// Creates a descriptor from a path relative to an (empty) base
    pub fn new(relative: impl Into<PathBuf>, contents: Contents) -> Self {
        Self {
            cwd: PathBuf::new(),
            base: PathBuf::new(),
            path: relative.into(),
            contents,
            stat: None,
            options: None,
            delegate: None,
            flag: None,
        }
    }

    /// Creates a descriptor whose `path` lives under `base`
    pub fn with_base(
        base: impl Into<PathBuf>,
        path: impl Into<PathBuf>,
        contents: Contents,
    ) -> Self {
        let mut file = Self::new(path, contents);
        file.base = base.into();
        file
    }

    pub fn stat(mut self, stat: FileStat) -> Self {
        self.stat = Some(stat);
        self
    }

    pub fn options(mut self, options: DestOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn delegate(mut self, delegate: Arc<dyn WriteDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Path relative to `base`.
    ///
    /// A path outside `base` is returned without its root, so it can never
    /// escape the directory it is joined onto.
    pub fn relative(&self) -> &Path {
        let relative = self.path.strip_prefix(&self.base).unwrap_or(&self.path);
        let mut components = relative.components();
        while matches!(
            components.clone().next(),
            Some(Component::RootDir | Component::Prefix(_))
        ) {
            components.next();
        }
        components.as_path()
    }

    /// Declared permission bits, if any
    pub fn mode(&self) -> Option<u32> {
        self.stat.and_then(|stat| stat.mode)
    }

    /// Applies a resolution result, returning the updated descriptor.
    ///
    /// A missing stat is synthesized so that it is always present afterwards.
    pub fn with_target(mut self, target: &ResolvedTarget) -> Self {
        let mut stat = self.stat.unwrap_or_default();
        stat.mode = target.mode;
        self.stat = Some(stat);
        self.flag = Some(target.flag);
        self.cwd = target.cwd.clone();
        self.base = target.base.clone();
        self.path = target.path.clone();
        self
    }
}

impl fmt::Debug for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDescriptor")
            .field("cwd", &self.cwd)
            .field("base", &self.base)
            .field("path", &self.path)
            .field("contents", &self.contents)
            .field("stat", &self.stat)
            .field("options", &self.options)
            .field("delegate", &self.delegate.is_some())
            .field("flag", &self.flag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_strips_base() {
        let file = FileDescriptor::with_base("/src", "/src/a/b.txt", Contents::Null);
        assert_eq!(file.relative(), Path::new("a/b.txt"));

        let file = FileDescriptor::new("a/b.txt", Contents::Null);
        assert_eq!(file.relative(), Path::new("a/b.txt"));
    }

    #[test]
    fn test_relative_drops_root_outside_base() {
        let file = FileDescriptor::new("/abs/x.txt", Contents::Null);
        assert_eq!(file.relative(), Path::new("abs/x.txt"));

        let file = FileDescriptor::with_base("/src", "/other/y.txt", Contents::Null);
        assert_eq!(file.relative(), Path::new("other/y.txt"));
    }

    #[test]
    fn test_with_target_synthesizes_stat() {
        let file = FileDescriptor::new("a.txt", Contents::Buffer(b"x".to_vec()));
        assert!(file.stat.is_none());

        let target = ResolvedTarget {
            cwd: PathBuf::from("/work"),
            base: PathBuf::from("/work/out"),
            path: PathBuf::from("/work/out/a.txt"),
            mode: None,
            dir_mode: None,
            flag: WriteFlag::Exclusive,
        };
        let file = file.with_target(&target);

        assert_eq!(file.stat, Some(FileStat { mode: None }));
        assert_eq!(file.flag, Some(WriteFlag::Exclusive));
        assert_eq!(file.relative(), Path::new("a.txt"));
        assert_eq!(file.cwd, PathBuf::from("/work"));
    }
}
