//! Command/update plumbing for running merges off the caller's thread
//!
//! A front end owns a [`WorkerHandle`], sends [`MergeCommand`]s and drains
//! [`MergeUpdate`]s. The worker keeps the last merged canvas so it can be
//! saved without merging again.

mod worker;

use std::path::PathBuf;
use tokio::sync::mpsc;

// Re-export types from the library crate
pub use image_merge::{MergeOptions, OutputFormat};
pub use worker::worker_task;

/// Commands sent from front end to worker
#[derive(Debug)]
pub enum MergeCommand {
    Merge {
        paths: Vec<PathBuf>,
        options: MergeOptions,
    },
    /// Save the last merged canvas
    Save {
        output_path: PathBuf,
        /// Overrides the extension of `output_path` when set
        format_hint: Option<OutputFormat>,
    },
    /// Drop the last merged canvas
    Clear,
}

/// Updates sent from worker to front end
#[derive(Debug, Clone)]
pub enum MergeUpdate {
    Progress {
        stage: String,
        current: usize,
        total: usize,
    },
    Merged {
        width: u32,
        height: u32,
        block_count: usize,
        skipped: Vec<PathBuf>,
    },
    Saved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Merge worker has shut down")]
    Disconnected,
}

/// Both channel ends of a running worker
pub struct WorkerHandle {
    command_tx: mpsc::UnboundedSender<MergeCommand>,
    update_rx: mpsc::UnboundedReceiver<MergeUpdate>,
}

impl WorkerHandle {
    pub fn send(&self, cmd: MergeCommand) -> Result<(), WorkerError> {
        self.command_tx
            .send(cmd)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Wait for the next update, `None` once the worker has stopped
    pub async fn recv(&mut self) -> Option<MergeUpdate> {
        self.update_rx.recv().await
    }

    /// Non-blocking poll for front ends with their own event loop
    pub fn try_recv(&mut self) -> Option<MergeUpdate> {
        self.update_rx.try_recv().ok()
    }
}

/// Spawn [`worker_task`] on the current tokio runtime
pub fn spawn_worker() -> WorkerHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker_task(command_rx, update_tx));
    WorkerHandle {
        command_tx,
        update_rx,
    }
}
