//! Batch Orchestrator: filter, concurrent dispatch, latency floor, join.

use crate::adapter::{compress_file, CompressionOptions, CompressionResult};
use crate::constants::{MIN_VISIBLE_DURATION, PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};
use crate::error::{CompressionError, Result};
use crate::formats::is_image_input;
use crate::{error, info, verbose};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub compression: CompressionOptions,
    /// The batch never resolves to the caller faster than this, so near
    /// instant runs still read as "work happened". Zero disables the floor.
    pub min_duration: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            compression: CompressionOptions::default(),
            min_duration: MIN_VISIBLE_DURATION,
        }
    }
}

/// Ordered results of one submission. Every element is a fully successful
/// compression; there is no partial-success state.
#[derive(Debug, Default)]
pub struct Batch {
    results: Vec<CompressionResult>,
}

impl Batch {
    pub fn new(results: Vec<CompressionResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[CompressionResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompressionResult> {
        self.results.iter()
    }

    pub fn into_results(self) -> Vec<CompressionResult> {
        self.results
    }
}

/// One message on the join channel. The join loop discriminates on the
/// variant; nothing probes result shapes structurally.
enum BatchEvent {
    Completed {
        index: usize,
        result: Box<CompressionResult>,
    },
    Failed {
        index: usize,
        error: CompressionError,
    },
    TimerElapsed,
}

/// Run one batch: filter to image inputs, compress each concurrently, wait
/// for the slower of (all tasks joined, latency floor elapsed).
///
/// Non-image files produce no entry and no error. An empty filtered set
/// fails with [`CompressionError::NoValidInput`] before any work starts.
/// Any single task failure fails the whole batch with
/// [`CompressionError::CompressionFailure`], discarding completed results.
/// A successful batch is in input submission order.
pub fn process_batch(files: &[PathBuf], options: &BatchOptions) -> Result<Batch> {
    let valid: Vec<&Path> = files
        .iter()
        .map(PathBuf::as_path)
        .filter(|p| is_image_input(p))
        .collect();

    if valid.is_empty() {
        return Err(CompressionError::NoValidInput);
    }

    let total = valid.len();
    let start_time = Instant::now();
    verbose!("dispatching {} compression tasks", total);

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
            .map(|style| style.progress_chars(PROGRESS_BAR_CHARS))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let (tx, rx) = mpsc::channel();

    let timer_tx = tx.clone();
    let floor = options.min_duration;
    let timer = thread::spawn(move || {
        thread::sleep(floor);
        let _ = timer_tx.send(BatchEvent::TimerElapsed);
    });

    let mut slots: Vec<Option<CompressionResult>> = Vec::with_capacity(total);
    slots.resize_with(total, || None);
    let mut failed = 0usize;
    let mut joined = 0usize;
    let mut timer_elapsed = false;

    // One independent rayon task per file; each carries its submission
    // index so the join can restore input order. Dispatch runs on a scoped
    // thread so this thread drains the channel while tasks land, advancing
    // the bar per completed task instead of all at once at the end.
    thread::scope(|scope| {
        let dispatch_tx = tx;
        let compression = &options.compression;
        let dispatch_files = &valid;
        scope.spawn(move || {
            dispatch_files
                .par_iter()
                .enumerate()
                .for_each_with(dispatch_tx, |tx, (index, path)| {
                    let event = match compress_file(path, compression) {
                        Ok(result) => BatchEvent::Completed {
                            index,
                            result: Box::new(result),
                        },
                        Err(error) => BatchEvent::Failed { index, error },
                    };
                    let _ = tx.send(event);
                });
        });

        while joined < total || !timer_elapsed {
            match rx.recv() {
                Ok(BatchEvent::Completed { index, result }) => {
                    slots[index] = Some(*result);
                    joined += 1;
                    progress.inc(1);
                }
                Ok(BatchEvent::Failed { index, error }) => {
                    error!("failed to compress {:?}: {}", valid[index], error);
                    failed += 1;
                    joined += 1;
                    progress.inc(1);
                }
                Ok(BatchEvent::TimerElapsed) => {
                    timer_elapsed = true;
                }
                Err(_) => break,
            }
        }
    });
    let _ = timer.join();
    progress.finish_and_clear();

    if failed > 0 {
        return Err(CompressionError::CompressionFailure { failed, total });
    }

    let results: Vec<CompressionResult> = slots.into_iter().flatten().collect();
    if results.len() != total {
        return Err(CompressionError::CompressionFailure {
            failed: total - results.len(),
            total,
        });
    }

    info!(
        "✅ Compressed {} files in {:.2?}",
        total,
        start_time.elapsed()
    );
    Ok(Batch::new(results))
}

/// Expand CLI inputs into candidate files. Plain files pass through as-is
/// (the batch filter decides whether they count); directories are walked,
/// hidden entries skipped, and only image files collected.
pub fn collect_input_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let walker = if recursive {
                WalkDir::new(input).into_iter()
            } else {
                WalkDir::new(input).max_depth(1).into_iter()
            };

            // depth 0 is the root the user named; only entries below it
            // count as hidden
            for entry in walker.filter_entry(|e| {
                e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
            }) {
                let entry = entry?;
                let path = entry.path();
                if path.is_file() && is_image_input(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            return Err(CompressionError::FileNotFound(input.clone()));
        }
    }

    Ok(files)
}
