//! Error handling
//!
//! Defines error types and handling for the file sink.

pub mod handlers;
pub mod types;

pub use types::*;
