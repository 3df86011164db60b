//! Compression Adapter: one source file in, one fully populated
//! [`CompressionResult`] out. The codec itself lives behind [`crate::codec`].

use crate::codec;
use crate::constants::{
    COMPRESSED_NAME_PREFIX, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, DEFAULT_TARGET_SIZE,
    MAX_QUALITY, MIN_QUALITY, TARGET_SIZE_QUALITY_FLOOR, TARGET_SIZE_QUALITY_STEP,
};
use crate::error::{CompressionError, Result};
use crate::formats::SourceFormat;
use crate::utils::{format_file_size, reduction_percentage};
use crate::{verbose, warn};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-file compression options, fixed at the call-site for a whole batch.
#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub quality: u8,
    /// Longest output edge; larger inputs are downscaled to fit.
    pub max_dimension: u32,
    /// Soft output size target for lossy formats, in bytes.
    pub target_size: u64,
}

impl CompressionOptions {
    pub fn new(quality: Option<u8>, max_dimension: Option<u32>, target_size: Option<u64>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        Ok(Self {
            quality,
            max_dimension: max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION),
            target_size: target_size.unwrap_or(DEFAULT_TARGET_SIZE),
        })
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
            target_size: DEFAULT_TARGET_SIZE,
        }
    }
}

/// Outcome of one successful compression. `data` owns the compressed
/// payload; dropping the result releases it.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub original_path: PathBuf,
    pub original_name: String,
    pub output_name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub reduction_percentage: i32,
    pub data: Vec<u8>,
}

/// Compress a single image file.
///
/// Reads the file once, decodes, downscales to fit within
/// `options.max_dimension` (aspect-preserving, only when larger) and
/// re-encodes. JPEG output steps quality down until it fits
/// `options.target_size` or hits the quality floor. Any codec failure is
/// propagated; there is no retry.
pub fn compress_file(path: &Path, options: &CompressionOptions) -> Result<CompressionResult> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    let format = SourceFormat::from_path(path).ok_or_else(|| {
        CompressionError::UnsupportedFormat(path.to_string_lossy().into_owned())
    })?;
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CompressionError::UnsupportedFormat("invalid file name".to_string()))?;

    let bytes = fs::read(path)?;
    let original_size = bytes.len() as u64;
    let img = codec::decode(&bytes)?;
    let img = fit_within(img, options.max_dimension);

    let mut quality = options.quality;
    let mut data = codec::encode(&img, format, quality)?;

    // browser-image-compression style: walk JPEG quality down toward the
    // size target instead of failing on oversized output
    if format == SourceFormat::Jpeg {
        while data.len() as u64 > options.target_size && quality > TARGET_SIZE_QUALITY_FLOOR {
            quality = quality
                .saturating_sub(TARGET_SIZE_QUALITY_STEP)
                .max(TARGET_SIZE_QUALITY_FLOOR);
            verbose!("{}: retrying at quality {}", original_name, quality);
            data = codec::encode(&img, format, quality)?;
        }
    }

    let compressed_size = data.len() as u64;
    if compressed_size > original_size {
        warn!(
            "{} grew from {} to {}",
            original_name,
            format_file_size(original_size),
            format_file_size(compressed_size)
        );
    }

    Ok(CompressionResult {
        original_path: path.to_path_buf(),
        output_name: derive_output_name(&original_name, format),
        original_name,
        original_size,
        compressed_size,
        reduction_percentage: reduction_percentage(original_size, compressed_size),
        data,
    })
}

/// `compressed-<originalName>`, with the extension swapped when the codec
/// changes the container (GIF/BMP/TIFF come back as PNG).
pub fn derive_output_name(original_name: &str, format: SourceFormat) -> String {
    let output = codec::output_format(format);
    if output == format {
        format!("{}{}", COMPRESSED_NAME_PREFIX, original_name)
    } else {
        let stem = original_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(original_name);
        format!("{}{}.{}", COMPRESSED_NAME_PREFIX, stem, output.extension())
    }
}

fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if max_dimension > 0 && width.max(height) > max_dimension {
        img.resize(max_dimension, max_dimension, image::imageops::FilterType::Lanczos3)
    } else {
        img
    }
}
