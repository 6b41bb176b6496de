//! Benchmarks for the stacking writer.
//!
//! Run with: cargo bench
//!
//! Fixture frames are generated into a temporary directory at startup.

use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use image::DynamicImage;
use rebundle::{
    ContainerSession, ContainerSink, DecodedFrame, FrameDecoder, RebundleError, SizeMode,
    StackRequest, Stacker, frame_path,
};

const FRAME_COUNT: u64 = 300;

/// Sink that discards pixel data; isolates source iteration and rotation
/// bookkeeping from encoding cost.
struct NullSink;

struct NullSession;

impl ContainerSink for NullSink {
    fn open(
        &self,
        _path: &Path,
        _mode: SizeMode,
    ) -> Result<Box<dyn ContainerSession>, RebundleError> {
        Ok(Box::new(NullSession))
    }
}

impl ContainerSession for NullSession {
    fn append(&mut self, image: &DynamicImage) -> Result<u64, RebundleError> {
        Ok(image.as_bytes().len() as u64)
    }

    fn finish(self: Box<Self>) -> Result<(), RebundleError> {
        Ok(())
    }
}

/// Decoder that skips the file contents entirely.
struct TinyDecoder;

impl FrameDecoder for TinyDecoder {
    fn decode(&self, _path: &Path) -> Result<DecodedFrame, RebundleError> {
        let image = DynamicImage::new_luma8(1, 1);
        let byte_size = image.as_bytes().len() as u64;
        Ok(DecodedFrame { image, byte_size })
    }
}

fn benchmark_rotation_bookkeeping(criterion: &mut Criterion) {
    let source = tempfile::tempdir().expect("Failed to create source dir");
    let out = tempfile::tempdir().expect("Failed to create output dir");
    for number in 0..FRAME_COUNT {
        std::fs::write(frame_path(source.path(), number), b"frame").unwrap();
    }

    let request = StackRequest::new(source.path(), out.path(), "bench", 0, FRAME_COUNT - 1)
        .with_size_mode(SizeMode::Extended);

    criterion.bench_function("stack 300 frames (null codec)", |bencher| {
        bencher.iter(|| {
            Stacker::new(request.clone())
                .run_with(&NullSink, &TinyDecoder)
                .unwrap()
        });
    });

    let split_request = request.clone().with_split_every(25);
    criterion.bench_function("stack 300 frames, split every 25 (null codec)", |bencher| {
        bencher.iter(|| {
            Stacker::new(split_request.clone())
                .run_with(&NullSink, &TinyDecoder)
                .unwrap()
        });
    });
}

fn benchmark_decode_path(criterion: &mut Criterion) {
    let source = tempfile::tempdir().expect("Failed to create source dir");
    let out = tempfile::tempdir().expect("Failed to create output dir");
    for number in 0..FRAME_COUNT {
        DynamicImage::new_luma8(32, 32)
            .save(frame_path(source.path(), number))
            .unwrap();
    }

    let request = StackRequest::new(source.path(), out.path(), "bench", 0, FRAME_COUNT - 1)
        .with_size_mode(SizeMode::Extended);

    criterion.bench_function("stack 300 decoded frames (null codec)", |bencher| {
        bencher.iter(|| {
            Stacker::new(request.clone())
                .run_with(&NullSink, &rebundle::ImageFrameDecoder)
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    benchmark_rotation_bookkeeping,
    benchmark_decode_path
);
criterion_main!(benches);
