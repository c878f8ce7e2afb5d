//! Resolver options
//!
//! Destination and base specifications plus the overlayable option set.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::file::FileDescriptor;

/// Function computing a path from a descriptor
pub type PathFn = Arc<dyn Fn(&FileDescriptor) -> String + Send + Sync>;

/// Destination directory, fixed or computed per file
#[derive(Clone)]
pub enum DestSpec {
    Literal(PathBuf),
    Computed(PathFn),
}

impl DestSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&FileDescriptor) -> String + Send + Sync + 'static,
    {
        DestSpec::Computed(Arc::new(f))
    }
}

impl From<&str> for DestSpec {
    fn from(dest: &str) -> Self {
        DestSpec::Literal(PathBuf::from(dest))
    }
}

impl From<String> for DestSpec {
    fn from(dest: String) -> Self {
        DestSpec::Literal(PathBuf::from(dest))
    }
}

impl From<&Path> for DestSpec {
    fn from(dest: &Path) -> Self {
        DestSpec::Literal(dest.to_path_buf())
    }
}

impl From<PathBuf> for DestSpec {
    fn from(dest: PathBuf) -> Self {
        DestSpec::Literal(dest)
    }
}

impl fmt::Debug for DestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestSpec::Literal(p) => f.debug_tuple("Literal").field(p).finish(),
            DestSpec::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// Explicit base directory override
#[derive(Clone)]
pub enum BaseSpec {
    Literal(PathBuf),
    Computed(PathFn),
}

impl BaseSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&FileDescriptor) -> String + Send + Sync + 'static,
    {
        BaseSpec::Computed(Arc::new(f))
    }
}

impl fmt::Debug for BaseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseSpec::Literal(p) => f.debug_tuple("Literal").field(p).finish(),
            BaseSpec::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// Which dot starts the extension when rewriting it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtDot {
    /// `a.min.coffee` has extension `.min.coffee`
    #[default]
    First,
    /// `a.min.coffee` has extension `.coffee`
    Last,
}

impl FromStr for ExtDot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ExtDot::First),
            "last" => Ok(ExtDot::Last),
            other => Err(format!("ext_dot must be \"first\" or \"last\", got {other:?}")),
        }
    }
}

/// Sink options. Unset fields fall through to the next layer:
/// defaults < sink-wide options < per-file options.
#[derive(Debug, Clone, Default)]
pub struct DestOptions {
    pub cwd: Option<PathBuf>,
    pub base: Option<BaseSpec>,
    pub destbase: Option<PathBuf>,
    pub expand: Option<bool>,
    pub flatten: Option<bool>,
    /// Replacement extension; an empty string strips the extension
    pub ext: Option<String>,
    pub ext_dot: Option<ExtDot>,
    pub mode: Option<u32>,
    pub dir_mode: Option<u32>,
    pub overwrite: Option<bool>,
}

impl DestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn base(mut self, base: BaseSpec) -> Self {
        self.base = Some(base);
        self
    }

    pub fn destbase(mut self, destbase: impl Into<PathBuf>) -> Self {
        self.destbase = Some(destbase.into());
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = Some(expand);
        self
    }

    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = Some(flatten);
        self
    }

    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    pub fn ext_dot(mut self, ext_dot: ExtDot) -> Self {
        self.ext_dot = Some(ext_dot);
        self
    }

    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn dir_mode(mut self, dir_mode: u32) -> Self {
        self.dir_mode = Some(dir_mode);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Overlays `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(&self, overrides: &DestOptions) -> DestOptions {
        DestOptions {
            cwd: overrides.cwd.clone().or_else(|| self.cwd.clone()),
            base: overrides.base.clone().or_else(|| self.base.clone()),
            destbase: overrides.destbase.clone().or_else(|| self.destbase.clone()),
            expand: overrides.expand.or(self.expand),
            flatten: overrides.flatten.or(self.flatten),
            ext: overrides.ext.clone().or_else(|| self.ext.clone()),
            ext_dot: overrides.ext_dot.or(self.ext_dot),
            mode: overrides.mode.or(self.mode),
            dir_mode: overrides.dir_mode.or(self.dir_mode),
            overwrite: overrides.overwrite.or(self.overwrite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_overrides() {
        let global = DestOptions::new().cwd("a").flatten(true).mode(0o644);
        let per_file = DestOptions::new().cwd("b").overwrite(false);

        let merged = global.merge(&per_file);
        assert_eq!(merged.cwd, Some(PathBuf::from("b")));
        assert_eq!(merged.flatten, Some(true));
        assert_eq!(merged.mode, Some(0o644));
        assert_eq!(merged.overwrite, Some(false));
        assert_eq!(merged.ext, None);
    }

    #[test]
    fn test_parse_ext_dot() {
        assert_eq!("first".parse::<ExtDot>(), Ok(ExtDot::First));
        assert_eq!("LAST".parse::<ExtDot>(), Ok(ExtDot::Last));
        assert!("middle".parse::<ExtDot>().is_err());
    }
}
