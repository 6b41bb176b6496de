//! Stack a directory of numbered frames into multi-frame containers.
//!
//! Usage: cargo run --example stack_basic -- <source_dir> <output_dir>

use rebundle::{StackRequest, Stacker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "shots".to_string());
    let output = args.next().unwrap_or_else(|| "archive".to_string());

    let request = StackRequest::new(&source, &output, "master", 0, 7999).with_split_every(2000);

    std::fs::create_dir_all(&output)?;
    let report = Stacker::new(request).run()?;

    println!(
        "stacked {} frames into {} files ({} skipped)",
        report.frames_written,
        report.files.len(),
        report.frames_skipped,
    );
    for path in &report.files {
        println!("  {}", path.display());
    }

    Ok(())
}
