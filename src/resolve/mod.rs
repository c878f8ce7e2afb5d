//! Path resolver
//!
//! Pure computation of destination paths, base directories and write flags.

pub mod ext;
pub mod operations;
pub mod options;
pub mod path;
pub mod results;

pub use operations::resolve;
pub use options::{BaseSpec, DestOptions, DestSpec, ExtDot, PathFn};
pub use results::{ResolvedTarget, WriteFlag};
