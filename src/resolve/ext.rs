//! Extension rewriting

use std::path::{Path, PathBuf};

use crate::resolve::ExtDot;

/// Replaces the extension of the final path component.
///
/// An empty `ext` strips the extension. If the rewrite would leave an empty
/// file name the path is returned unchanged.
pub fn rewrite_ext(path: &Path, ext: &str, dot: ExtDot) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    let renamed = replace_ext(&name.to_string_lossy(), ext, dot);
    if renamed.is_empty() {
        return path.to_path_buf();
    }
    path.with_file_name(renamed)
}

/// Replaces the extension of a bare file name
pub fn replace_ext(name: &str, ext: &str, dot: ExtDot) -> String {
    let split = match dot {
        ExtDot::First => name.find('.'),
        ExtDot::Last => name.rfind('.'),
    };
    let stem = split.map_or(name, |idx| &name[..idx]);

    let mut renamed = String::with_capacity(stem.len() + ext.len() + 1);
    renamed.push_str(stem);
    if !ext.starts_with('.') {
        renamed.push('.');
    }
    renamed.push_str(ext);

    // an empty replacement leaves a dangling dot
    if renamed.ends_with('.') {
        renamed.pop();
    }
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_dot() {
        assert_eq!(
            rewrite_ext(Path::new("a/b/c.min.coffee"), "js", ExtDot::Last),
            PathBuf::from("a/b/c.min.js")
        );
    }

    #[test]
    fn test_first_dot() {
        assert_eq!(
            rewrite_ext(Path::new("a/b/c.min.coffee"), "js", ExtDot::First),
            PathBuf::from("a/b/c.js")
        );
        assert_eq!(
            rewrite_ext(Path::new("a/b/c.min.coffee"), ".js", ExtDot::First),
            PathBuf::from("a/b/c.js")
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(
            rewrite_ext(Path::new("a/b/c.min.coffee"), "", ExtDot::First),
            PathBuf::from("a/b/c")
        );
        assert_eq!(
            rewrite_ext(Path::new("a/b/c.min.coffee"), "", ExtDot::Last),
            PathBuf::from("a/b/c.min")
        );
    }

    #[test]
    fn test_dotless_names_gain_extension() {
        assert_eq!(replace_ext("README", "md", ExtDot::First), "README.md");
        assert_eq!(replace_ext("README", "", ExtDot::Last), "README");
    }

    #[test]
    fn test_dotfile_stays_when_name_would_vanish() {
        assert_eq!(
            rewrite_ext(Path::new("a/.gitignore"), "", ExtDot::First),
            PathBuf::from("a/.gitignore")
        );
    }

    #[test]
    fn test_directory_dots_are_ignored() {
        assert_eq!(
            rewrite_ext(Path::new("a.d/b"), "txt", ExtDot::First),
            PathBuf::from("a.d/b.txt")
        );
    }
}
