//! Sink core
//!
//! Resolves each incoming descriptor and hands it to its write delegate or
//! to the filesystem dispatcher.

use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::handlers::log_error;
use crate::error::{ResolveError, SinkError};
use crate::file::FileDescriptor;
use crate::resolve::{DestOptions, DestSpec, ResolvedTarget, resolve};
use crate::storage::write_file;

/// Result delivered for each file pushed through a spawned sink
pub type SinkResult = Result<FileDescriptor, SinkError>;

/// Writes descriptors under a destination directory
pub struct Sink {
    dest: DestSpec,
    options: DestOptions,
    process_cwd: PathBuf,
}

impl Sink {
    /// Creates a sink anchored at the current process directory
    pub fn new(dest: impl Into<DestSpec>, options: DestOptions) -> io::Result<Self> {
        let process_cwd = std::env::current_dir()?;
        Ok(Self::with_cwd(dest, options, process_cwd))
    }

    /// Creates a sink anchored at an explicit working directory
    pub fn with_cwd(
        dest: impl Into<DestSpec>,
        options: DestOptions,
        process_cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dest: dest.into(),
            options,
            process_cwd: process_cwd.into(),
        }
    }

    pub fn process_cwd(&self) -> &Path {
        &self.process_cwd
    }

    /// Computes the target for `file` without writing anything
    pub fn resolve(&self, file: &FileDescriptor) -> Result<ResolvedTarget, ResolveError> {
        resolve(&self.dest, file, &self.options, &self.process_cwd)
    }

    /// Resolves and writes a single file
    pub async fn write(&self, file: FileDescriptor) -> SinkResult {
        let target = self.resolve(&file)?;
        let file = file.with_target(&target);

        match file.delegate.clone() {
            Some(delegate) => {
                debug!("Delegating write of {}", target.path.display());
                delegate.write(&target.path, &target, file).await
            }
            None => {
                let (file, _) = write_file(&target.path, file, &target).await?;
                Ok(file)
            }
        }
    }

    /// Runs the sink as a pipeline stage.
    ///
    /// Files are written one at a time, in order. The next file is not
    /// received until the previous result has been accepted by the output
    /// channel, so a slow consumer throttles the producer.
    pub fn spawn(
        self,
        mut input: mpsc::Receiver<FileDescriptor>,
    ) -> (mpsc::Receiver<SinkResult>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            while let Some(file) = input.recv().await {
                let result = self.write(file).await;
                if let Err(e) = &result {
                    log_error(e);
                }
                if tx.send(result).await.is_err() {
                    warn!("Sink output closed, stopping");
                    break;
                }
            }
        });

        (rx, handle)
    }
}
