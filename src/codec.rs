//! Encode boundary over the `image` and `oxipng` crates.
//!
//! Everything above this module treats compression as opaque: bytes in,
//! compressed bytes out. The whole pipeline is in-memory, so PNG
//! optimization runs through `optimize_from_memory` rather than temp files.

use crate::constants::{LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, ZOPFLI_ITERATIONS};
use crate::error::{CompressionError, Result};
use crate::formats::SourceFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;

/// Decode an image payload, guessing the format from the bytes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Output format for a given source format.
///
/// JPEG, PNG and WebP round-trip through their own encoders; GIF, BMP and
/// TIFF have no lossy re-encoder here and come out as optimized PNG.
pub fn output_format(source: SourceFormat) -> SourceFormat {
    match source {
        SourceFormat::Jpeg | SourceFormat::Png | SourceFormat::WebP => source,
        SourceFormat::Gif | SourceFormat::Bmp | SourceFormat::Tiff => SourceFormat::Png,
    }
}

/// Encode `img` for the given source format at the given quality.
pub fn encode(img: &DynamicImage, source: SourceFormat, quality: u8) -> Result<Vec<u8>> {
    match output_format(source) {
        SourceFormat::Jpeg => encode_jpeg(img, quality),
        SourceFormat::Png => encode_png(img, quality),
        SourceFormat::WebP => encode_webp(img),
        other => Err(CompressionError::UnsupportedFormat(other.to_string())),
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(buf)
}

fn encode_png(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;

    let mut options = Options::from_preset(4);
    options.force = true;
    options.deflate = deflater_for_quality(quality);

    oxipng::optimize_from_memory(&buf, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>> {
    // The image crate's WebP encoder is lossless and wants RGB8/RGBA8
    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
    let mut buf = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut buf);
    rgba.write_with_encoder(encoder)?;
    Ok(buf)
}

/// Quality >= 90 gets Zopfli, >= 70 high-level libdeflater, below that the
/// faster low level.
fn deflater_for_quality(quality: u8) -> Deflaters {
    if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    }
}
