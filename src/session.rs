//! Session controller: explicit owned state for one compression session.
//!
//! One submission at a time; a new upload resets everything. All batch
//! failures collapse into a single user-facing error state, and the caller
//! resubmits from scratch.

use crate::archive::{package, Artifact};
use crate::batch::{process_batch, Batch, BatchOptions};
use crate::error::{CompressionError, Result};
use crate::stats::{aggregate, BatchStats};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Compressing,
    Success,
    Error,
}

#[derive(Debug)]
pub struct Session {
    state: AppState,
    options: BatchOptions,
    batch: Option<Batch>,
    last_error: Option<CompressionError>,
}

impl Session {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            state: AppState::Idle,
            options,
            batch: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn batch(&self) -> Option<&Batch> {
        self.batch.as_ref()
    }

    pub fn last_error(&self) -> Option<&CompressionError> {
        self.last_error.as_ref()
    }

    /// Run one submission through the pipeline. Replaces whatever the
    /// previous submission left behind before any work starts.
    pub fn submit(&mut self, files: &[PathBuf]) -> AppState {
        self.reset();
        self.state = AppState::Compressing;

        match process_batch(files, &self.options) {
            Ok(batch) => {
                self.batch = Some(batch);
                self.state = AppState::Success;
            }
            Err(error) => {
                self.last_error = Some(error);
                self.state = AppState::Error;
            }
        }
        self.state
    }

    /// Statistics for the current batch, if the last submission succeeded.
    pub fn stats(&self) -> Option<BatchStats> {
        self.batch.as_ref().map(aggregate)
    }

    /// Package the current batch for download. `Ok(None)` when there is
    /// nothing to package.
    pub fn package(&self) -> Result<Option<Artifact>> {
        match &self.batch {
            Some(batch) => package(batch),
            None => Ok(None),
        }
    }

    /// Clear the batch and any error; back to Idle.
    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.batch = None;
        self.last_error = None;
    }
}
