//! Observe a stacking run with a custom progress callback.
//!
//! Usage: cargo run --example stack_with_progress -- <source_dir> <output_dir>

use std::path::Path;
use std::sync::Arc;

use rebundle::{
    ProgressCallback, ProgressInfo, SizeMode, StackOptions, StackRequest, Stacker,
};

struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        println!(
            "{:.1}% ({}/{} frames, {} written, {} skipped)",
            info.percentage, info.current, info.total, info.frames_written, info.frames_skipped,
        );
    }

    fn on_frame_skipped(&self, frame_number: u64, path: &Path) {
        println!("frame {frame_number} missing ({})", path.display());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "shots".to_string());
    let output = args.next().unwrap_or_else(|| "archive".to_string());

    let request =
        StackRequest::new(&source, &output, "master", 0, 999).with_size_mode(SizeMode::Extended);
    let options = StackOptions::new()
        .with_progress(Arc::new(PrintProgress))
        .with_batch_size(100);

    std::fs::create_dir_all(&output)?;
    let report = Stacker::new(request).with_options(options).run()?;

    println!(
        "done: {} frames in {} files",
        report.frames_written,
        report.files.len(),
    );

    Ok(())
}
