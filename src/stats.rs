//! Result Aggregator: batch-level statistics derived from per-file results.

use crate::batch::Batch;
use crate::utils::reduction_percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub count: usize,
    pub total_original: u64,
    pub total_compressed: u64,
    pub reduction_percentage: i32,
}

/// Derive batch statistics. Pure; calling it twice on the same batch gives
/// the same answer. An empty batch aggregates to 0% by convention.
pub fn aggregate(batch: &Batch) -> BatchStats {
    let total_original: u64 = batch.iter().map(|r| r.original_size).sum();
    let total_compressed: u64 = batch.iter().map(|r| r.compressed_size).sum();

    BatchStats {
        count: batch.len(),
        total_original,
        total_compressed,
        reduction_percentage: reduction_percentage(total_original, total_compressed),
    }
}
