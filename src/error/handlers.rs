//! Error handlers
//!
//! Classification and logging helpers for sink errors.

use crate::error::types::SinkError;
use crate::resolve::WriteFlag;
use log::error;
use std::io;

/// Log a sink error
pub fn log_error(err: &SinkError) {
    error!("Sink error: {}", err);
}

/// An "already exists" failure is only tolerated under exclusive writes.
pub fn is_exists_conflict(err: &io::Error, flag: WriteFlag) -> bool {
    err.kind() == io::ErrorKind::AlreadyExists && flag == WriteFlag::Exclusive
}
