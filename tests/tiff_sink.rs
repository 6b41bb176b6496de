//! TIFF codec integration tests.
//!
//! Containers written through [`TiffContainerSink`] are read back with the
//! `tiff` decoder to verify page count, dimensions, and addressing mode.

use std::fs::File;

use image::DynamicImage;
use rebundle::{ContainerSink, SizeMode, TiffContainerSink};
use tiff::decoder::Decoder;

fn page_count(path: &std::path::Path) -> usize {
    let file = File::open(path).expect("Failed to open container");
    let mut decoder = Decoder::new(file).expect("Failed to parse container");
    let mut pages = 1;
    while decoder.more_images() {
        decoder.next_image().expect("Failed to advance page");
        pages += 1;
    }
    pages
}

#[test]
fn classic_container_holds_one_page_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stack_0.tif");

    let mut session = TiffContainerSink
        .open(&path, SizeMode::Classic)
        .expect("Failed to open container");
    for _ in 0..3 {
        session
            .append(&DynamicImage::new_luma8(4, 3))
            .expect("Failed to append frame");
    }
    session.finish().expect("Failed to finalize container");

    assert_eq!(page_count(&path), 3);

    let mut decoder = Decoder::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (4, 3));
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::Gray(8));
}

#[test]
fn classic_container_uses_classic_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classic.tif");

    let mut session = TiffContainerSink.open(&path, SizeMode::Classic).unwrap();
    session.append(&DynamicImage::new_luma8(2, 2)).unwrap();
    session.finish().unwrap();

    let header = std::fs::read(&path).unwrap();
    // Little-endian classic TIFF: "II" then version 42.
    assert_eq!(&header[..4], &[0x49, 0x49, 0x2A, 0x00]);
}

#[test]
fn extended_mode_writes_bigtiff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.tif");

    let mut session = TiffContainerSink.open(&path, SizeMode::Extended).unwrap();
    session.append(&DynamicImage::new_luma8(2, 2)).unwrap();
    session.finish().unwrap();

    let header = std::fs::read(&path).unwrap();
    // Little-endian BigTIFF: "II" then version 43.
    assert_eq!(&header[..4], &[0x49, 0x49, 0x2B, 0x00]);

    assert_eq!(page_count(&path), 1);
}

#[test]
fn append_reports_pixel_payload_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sized.tif");

    let mut session = TiffContainerSink.open(&path, SizeMode::Classic).unwrap();
    let bytes = session.append(&DynamicImage::new_rgb8(4, 4)).unwrap();
    session.finish().unwrap();

    assert_eq!(bytes, 4 * 4 * 3);
}

#[test]
fn rgb_and_gray_frames_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.tif");

    let mut session = TiffContainerSink.open(&path, SizeMode::Classic).unwrap();
    session.append(&DynamicImage::new_rgb8(5, 5)).unwrap();
    session.append(&DynamicImage::new_luma8(5, 5)).unwrap();
    session.finish().unwrap();

    let mut decoder = Decoder::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(8));
    assert!(decoder.more_images());
    decoder.next_image().unwrap();
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::Gray(8));
    assert!(!decoder.more_images());
}

#[test]
fn alpha_grayscale_is_flattened_to_rgb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flattened.tif");

    let mut session = TiffContainerSink.open(&path, SizeMode::Classic).unwrap();
    session
        .append(&DynamicImage::new_luma_a8(3, 3))
        .expect("Unusual color models should still be written");
    session.finish().unwrap();

    let mut decoder = Decoder::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(8));
}
