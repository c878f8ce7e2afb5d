//! Lexical path helpers
//!
//! Resolves and normalizes paths without touching the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolves `path` against `base`. Absolute paths replace the base.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Drops `.` segments and folds `..` into their parent, never climbing above the root
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// True when the path contains a NUL byte, which no filesystem accepts
pub fn has_nul(path: &Path) -> bool {
    path.as_os_str().as_encoded_bytes().contains(&0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        assert_eq!(
            resolve_path(Path::new("/work"), Path::new("out/a.txt")),
            PathBuf::from("/work/out/a.txt")
        );
        assert_eq!(
            resolve_path(Path::new("/work"), Path::new("/tmp/a.txt")),
            PathBuf::from("/tmp/a.txt")
        );
        assert_eq!(
            resolve_path(Path::new("/work"), Path::new("")),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn test_normalize_dot_segments() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("../../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn test_has_nul() {
        assert!(has_nul(Path::new("a\0b")));
        assert!(!has_nul(Path::new("a/b")));
    }
}
