//! Write dispatcher
//!
//! Directory creation, content writes and permission reconciliation.

pub mod filesystem;
pub mod operations;
pub mod permissions;
pub mod results;

pub use operations::write_file;
pub use results::WriteOutcome;
