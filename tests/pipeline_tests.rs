mod common;

use common::{fake_result, gradient_image, write_corrupt_image, write_test_image, write_text_file};
use imgpress::adapter::CompressionOptions;
use imgpress::archive::{package, Artifact};
use imgpress::batch::{process_batch, Batch, BatchOptions};
use imgpress::codec;
use imgpress::error::CompressionError;
use imgpress::formats::SourceFormat;
use imgpress::stats::aggregate;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use zip::ZipArchive;

fn fast_options() -> BatchOptions {
    BatchOptions {
        compression: CompressionOptions::default(),
        min_duration: Duration::ZERO,
    }
}

#[test]
fn batch_length_matches_image_input_count() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "a.png", 64, 64),
        write_test_image(temp_dir.path(), "b.jpg", 80, 40),
        write_test_image(temp_dir.path(), "c.png", 32, 32),
    ];

    let batch = process_batch(&files, &fast_options()).unwrap();
    assert_eq!(batch.len(), 3);
}

#[test]
fn batch_preserves_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "first.png", 200, 200),
        write_test_image(temp_dir.path(), "second.jpg", 50, 50),
        write_test_image(temp_dir.path(), "third.png", 120, 80),
    ];

    let batch = process_batch(&files, &fast_options()).unwrap();
    let names: Vec<&str> = batch.iter().map(|r| r.original_name.as_str()).collect();
    assert_eq!(names, vec!["first.png", "second.jpg", "third.png"]);
}

#[test]
fn non_image_file_produces_no_entry_and_no_error() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "a.png", 64, 64),
        write_text_file(temp_dir.path(), "notes.txt"),
        write_test_image(temp_dir.path(), "b.jpg", 64, 64),
    ];

    let batch = process_batch(&files, &fast_options()).unwrap();
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().all(|r| r.original_name != "notes.txt"));
}

#[test]
fn zero_image_inputs_fail_before_any_work() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_text_file(temp_dir.path(), "a.txt"),
        write_text_file(temp_dir.path(), "b.csv"),
    ];

    let result = process_batch(&files, &fast_options());
    assert!(matches!(result, Err(CompressionError::NoValidInput)));
}

#[test]
fn one_failing_file_fails_the_whole_batch() {
    // Current/default semantics: no partial batch survives a single failure.
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "good.png", 64, 64),
        write_corrupt_image(temp_dir.path(), "bad.jpg"),
    ];

    let result = process_batch(&files, &fast_options());
    match result {
        Err(CompressionError::CompressionFailure { failed, total }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected CompressionFailure, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn batch_respects_minimum_latency_floor() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![write_test_image(temp_dir.path(), "tiny.png", 8, 8)];

    let options = BatchOptions {
        compression: CompressionOptions::default(),
        min_duration: Duration::from_millis(300),
    };

    let start = Instant::now();
    let batch = process_batch(&files, &options).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(batch.len(), 1);
    assert!(
        elapsed >= Duration::from_millis(300),
        "batch resolved in {:?}, under the floor",
        elapsed
    );
}

#[test]
fn aggregate_is_additive_over_real_results() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "a.png", 100, 100),
        write_test_image(temp_dir.path(), "b.jpg", 150, 90),
    ];
    let expected_original: u64 = files
        .iter()
        .map(|p| fs::metadata(p).unwrap().len())
        .sum();

    let batch = process_batch(&files, &fast_options()).unwrap();
    let stats = aggregate(&batch);

    assert_eq!(stats.count, 2);
    assert_eq!(stats.total_original, expected_original);
    assert_eq!(
        stats.total_compressed,
        batch.iter().map(|r| r.compressed_size).sum::<u64>()
    );
}

#[test]
fn end_to_end_batch_packages_into_zip() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_test_image(temp_dir.path(), "a.png", 64, 64),
        write_test_image(temp_dir.path(), "b.jpg", 64, 64),
    ];

    let batch = process_batch(&files, &fast_options()).unwrap();
    let artifact = package(&batch).unwrap().unwrap();

    assert_eq!(artifact.name(), "compressed-images.zip");
    let mut archive = ZipArchive::new(Cursor::new(artifact.data().to_vec())).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("compressed-a.png").is_ok());
    assert!(archive.by_name("compressed-b.jpg").is_ok());
}

#[test]
fn single_result_is_offered_directly() {
    let batch = Batch::new(vec![fake_result("only.png", 1000, 400)]);
    let artifact = package(&batch).unwrap().unwrap();

    assert!(matches!(artifact, Artifact::Single { .. }));
    assert_eq!(artifact.name(), "compressed-only.png");
}

#[test]
fn wide_batch_joins_every_task_exactly_once() {
    let temp_dir = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..12)
        .map(|i| {
            write_test_image(
                temp_dir.path(),
                &format!("img{:02}.png", i),
                16 + 8 * i as u32,
                16,
            )
        })
        .collect();

    let batch = process_batch(&files, &fast_options()).unwrap();
    assert_eq!(batch.len(), 12);

    let names: Vec<&str> = batch.iter().map(|r| r.original_name.as_str()).collect();
    let expected: Vec<String> = (0..12).map(|i| format!("img{:02}.png", i)).collect();
    assert_eq!(
        names,
        expected.iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn growing_output_is_a_warning_not_an_error() {
    // A throwaway-quality JPEG re-encoded at quality 100 comes back bigger;
    // the result still succeeds, with a negative reduction.
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tiny.jpg");
    let low_quality = codec::encode(&gradient_image(64, 64), SourceFormat::Jpeg, 10).unwrap();
    fs::write(&path, low_quality).unwrap();

    let options = BatchOptions {
        compression: CompressionOptions::new(Some(100), None, None).unwrap(),
        min_duration: Duration::ZERO,
    };
    let batch = process_batch(&[path], &options).unwrap();

    let result = &batch.results()[0];
    assert!(result.compressed_size > result.original_size);
    assert!(result.reduction_percentage < 0);
}

#[test]
fn three_file_batch_reduces_eighty_percent() {
    let batch = Batch::new(vec![
        fake_result("x.jpg", 1_000_000, 200_000),
        fake_result("y.jpg", 500_000, 100_000),
        fake_result("z.jpg", 250_000, 50_000),
    ]);

    let stats = aggregate(&batch);
    assert_eq!(stats.total_original, 1_750_000);
    assert_eq!(stats.total_compressed, 350_000);
    assert_eq!(stats.reduction_percentage, 80);
}
