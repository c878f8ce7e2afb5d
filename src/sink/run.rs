//! Tree copy driver
//!
//! Feeds a source tree through a spawned sink.

use log::{debug, error, info};
use std::io;
use std::path::Path;
use tokio::sync::mpsc;

use crate::error::SinkError;
use crate::sink::Sink;
use crate::source::read_tree;

/// Totals for a completed copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
}

/// Copies everything under `source` through `sink`.
///
/// Stops at the first fatal error and returns it.
pub async fn copy_tree(source: &Path, buffer: bool, sink: Sink) -> Result<RunSummary, SinkError> {
    let entries = read_tree(source)
        .await
        .map_err(|e| SinkError::io(source, e))?;
    info!("Found {} entries under {}", entries.len(), source.display());

    let (tx, rx) = mpsc::channel(1);
    let (mut results, handle) = sink.spawn(rx);

    let producer = tokio::spawn(async move {
        for entry in entries {
            let path = entry.path.clone();
            let file = match entry.into_descriptor(buffer).await {
                Ok(file) => file,
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    return Err(SinkError::io(path, e));
                }
            };
            if tx.send(file).await.is_err() {
                break;
            }
        }
        Ok(())
    });

    let mut summary = RunSummary::default();
    while let Some(result) = results.recv().await {
        let file = result?;
        debug!("Completed {}", file.path.display());
        summary.files += 1;
    }

    producer
        .await
        .map_err(|e| SinkError::io(source, io::Error::other(e)))??;
    handle
        .await
        .map_err(|e| SinkError::io(source, io::Error::other(e)))?;

    info!("Copied {} entries from {}", summary.files, source.display());
    Ok(summary)
}
