//! Resolution result types
//!
//! Defines the values produced by the path resolver.

use std::path::PathBuf;

/// How the dispatcher opens destination files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFlag {
    /// Create or truncate
    Overwrite,
    /// Fail if the destination already exists
    Exclusive,
}

impl WriteFlag {
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            WriteFlag::Overwrite
        } else {
            WriteFlag::Exclusive
        }
    }
}

/// Where and how a single file will be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub cwd: PathBuf,
    pub base: PathBuf,
    pub path: PathBuf,
    pub mode: Option<u32>,
    pub dir_mode: Option<u32>,
    pub flag: WriteFlag,
}
