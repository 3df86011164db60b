use std::time::Duration;

pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Quality floor for the JPEG target-size step-down loop.
pub const TARGET_SIZE_QUALITY_FLOOR: u8 = 30;
pub const TARGET_SIZE_QUALITY_STEP: u8 = 10;

/// Longest edge of any output image; larger inputs are downscaled to fit.
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

/// Soft size target for lossy re-encoding (1 MiB).
pub const DEFAULT_TARGET_SIZE: u64 = 1024 * 1024;

/// A batch never resolves to the caller faster than this.
pub const MIN_VISIBLE_DURATION: Duration = Duration::from_millis(800);

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const PROGRESS_BAR_CHARS: &str = "#>-";

/// Prefix for every compressed output name.
pub const COMPRESSED_NAME_PREFIX: &str = "compressed-";

/// Name of the multi-file download artifact.
pub const ARCHIVE_FILE_NAME: &str = "compressed-images.zip";
