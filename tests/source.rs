//! Frame source iterator integration tests.
//!
//! These run against the real `image`-backed decoder, with fixture frames
//! generated on the fly in a temporary directory.

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage};
use rebundle::{FrameOutcome, FrameSource, ImageFrameDecoder, RebundleError, frame_path};

fn write_frame(directory: &Path, number: u64, width: u32, height: u32) {
    let image = DynamicImage::ImageLuma8(GrayImage::new(width, height));
    image
        .save(frame_path(directory, number))
        .expect("Failed to write fixture frame");
}

#[test]
fn frame_path_pads_to_eight_digits() {
    let dir = Path::new("shots");
    assert_eq!(frame_path(dir, 0), dir.join("00000000.tif"));
    assert_eq!(frame_path(dir, 42), dir.join("00000042.tif"));
    // Wider numbers are not truncated.
    assert_eq!(frame_path(dir, 123_456_789), dir.join("123456789.tif"));
}

#[test]
fn yields_outcomes_in_ascending_order() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), 0, 2, 2);
    write_frame(dir.path(), 1, 2, 2);
    // Frame 2 is deliberately absent.

    let decoder = ImageFrameDecoder;
    let outcomes: Vec<_> = FrameSource::new(dir.path(), 0, 2, &decoder)
        .collect::<Result<_, _>>()
        .expect("Iteration failed");

    assert_eq!(outcomes.len(), 3);
    match &outcomes[0] {
        FrameOutcome::Loaded { number: 0, frame } => {
            assert_eq!(frame.byte_size, 4);
            assert_eq!(frame.image.width(), 2);
        }
        other => panic!("Expected frame 0 loaded, got: {other:?}"),
    }
    match &outcomes[1] {
        FrameOutcome::Loaded { number: 1, .. } => {}
        other => panic!("Expected frame 1 loaded, got: {other:?}"),
    }
    match &outcomes[2] {
        FrameOutcome::Skipped { number: 2, path } => {
            assert_eq!(*path, frame_path(dir.path(), 2));
        }
        other => panic!("Expected frame 2 skipped, got: {other:?}"),
    }
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let dir = tempfile::tempdir().unwrap();
    let decoder = ImageFrameDecoder;

    let count = FrameSource::new(dir.path(), 3, 7, &decoder).count();
    assert_eq!(count, 5);
}

#[test]
fn empty_range_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let decoder = ImageFrameDecoder;

    let mut source = FrameSource::new(dir.path(), 5, 2, &decoder);
    assert!(source.next().is_none());
}

#[test]
fn corrupt_frame_file_is_fatal_and_fuses_iteration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(frame_path(dir.path(), 0), b"this is not a tiff").unwrap();
    write_frame(dir.path(), 1, 2, 2);

    let decoder = ImageFrameDecoder;
    let mut source = FrameSource::new(dir.path(), 0, 1, &decoder);

    match source.next() {
        Some(Err(RebundleError::FrameDecode { path, .. })) => {
            assert_eq!(path, frame_path(dir.path(), 0));
        }
        other => panic!("Expected a decode error, got: {other:?}"),
    }

    // The error ends the iteration; frame 1 is never visited.
    assert!(source.next().is_none());
}

#[test]
fn decoder_reports_pixel_payload_size() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), 0, 8, 4);

    let decoder = ImageFrameDecoder;
    let outcome = FrameSource::new(dir.path(), 0, 0, &decoder)
        .next()
        .unwrap()
        .unwrap();

    match outcome {
        FrameOutcome::Loaded { frame, .. } => assert_eq!(frame.byte_size, 32),
        other => panic!("Expected loaded frame, got: {other:?}"),
    }
}
