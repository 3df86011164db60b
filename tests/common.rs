use image::{DynamicImage, Rgb, RgbImage};
use imgpress::adapter::CompressionResult;
use imgpress::utils::reduction_percentage;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A gradient image, so lossy encoders have something to chew on.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
        ]);
    }
    DynamicImage::ImageRgb8(img)
}

pub fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient_image(width, height).save(&path).unwrap();
    path
}

pub fn write_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"not an image")
        .unwrap();
    path
}

/// An image-named file whose payload no decoder accepts.
pub fn write_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"garbage bytes pretending to be pixels")
        .unwrap();
    path
}

/// Synthetic result for aggregator/packager tests that never ran a codec.
pub fn fake_result(name: &str, original: u64, compressed: u64) -> CompressionResult {
    CompressionResult {
        original_path: PathBuf::from(name),
        original_name: name.to_string(),
        output_name: format!("compressed-{}", name),
        original_size: original,
        compressed_size: compressed,
        reduction_percentage: reduction_percentage(original, compressed),
        data: vec![0u8; 16],
    }
}
