//! Helpers shared across the pipeline modules.

/// Format a byte count as a human-readable size ("1.5 KB", "3.2 MB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Rounded percentage reduction from `original` to `compressed` bytes.
///
/// Defined as 0 when `original == 0` so zero-byte inputs and empty batches
/// never produce NaN or a division error. Negative when the output grew.
pub fn reduction_percentage(original: u64, compressed: u64) -> i32 {
    if original == 0 {
        return 0;
    }
    let ratio = (original as f64 - compressed as f64) / original as f64;
    (ratio * 100.0).round() as i32
}
