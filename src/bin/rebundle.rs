use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rebundle::{
    ProgressCallback, ProgressInfo, SizeMode, StackOptions, StackRequest, Stacker, frame_path,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  rebundle stack shots --out archive --name master --end 7999 --split-every 2000 --progress\n  rebundle stack shots --out archive --name master --end 7999 --bigtiff\n  rebundle scan shots --end 7999 --json\n  rebundle completions zsh > _rebundle";

#[derive(Debug, Parser)]
#[command(
    name = "rebundle",
    version,
    about = "Stack numbered single-frame TIFF files into multi-frame containers",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stack a frame range into one or more containers.
    #[command(
        about = "Stack frames into multi-frame containers",
        after_help = "Examples:\n  rebundle stack shots --out archive --name master --end 3999\n  rebundle stack shots --out archive --name master --start 2000 --end 5999 --split-every 2000 --progress"
    )]
    Stack {
        /// Directory containing the numbered frame files.
        source: PathBuf,
        /// Output directory for generated containers.
        #[arg(long)]
        out: PathBuf,
        /// File stem of generated containers (file N is {name}_N.tif).
        #[arg(long, default_value = "stack")]
        name: String,
        /// First frame number (inclusive).
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Last frame number (inclusive).
        #[arg(long)]
        end: u64,
        /// Force a new container every N written frames (0 disables).
        #[arg(long, default_value_t = 0)]
        split_every: u64,
        /// Write BigTIFF containers with no per-file size limit.
        #[arg(long)]
        bigtiff: bool,
        /// Print the run summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check which frame files of a range are present on disk.
    #[command(
        about = "Report present and missing frames in a range",
        after_help = "Examples:\n  rebundle scan shots --end 7999\n  rebundle scan shots --start 2000 --end 5999 --json"
    )]
    Scan {
        /// Directory containing the numbered frame files.
        source: PathBuf,
        /// First frame number (inclusive).
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Last frame number (inclusive).
        #[arg(long)]
        end: u64,
        /// Print the scan result as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

/// Result of an existence-only sweep over a frame range.
struct ScanSummary {
    present: u64,
    missing: Vec<u64>,
}

fn scan_range(source: &Path, start: u64, end: u64) -> ScanSummary {
    let mut present = 0_u64;
    let mut missing = Vec::new();

    let mut number = start;
    loop {
        if frame_path(source, number).exists() {
            present += 1;
        } else {
            missing.push(number);
        }
        if number >= end {
            break;
        }
        number += 1;
    }

    ScanSummary { present, missing }
}

struct TerminalProgress {
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(bar) = &self.bar {
            bar.set_position(info.current);
        }
    }

    fn on_frame_skipped(&self, frame_number: u64, path: &Path) {
        let notice = format!("skipping frame {frame_number} ({} not found)", path.display());
        if let Some(bar) = &self.bar {
            bar.println(format!("{} {}", "warning:".yellow().bold(), notice.yellow()));
        } else if self.verbose {
            eprintln!("{} {}", "warning:".yellow().bold(), notice.yellow());
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stack {
            source,
            out,
            name,
            start,
            end,
            split_every,
            bigtiff,
            json,
        } => {
            let size_mode = if bigtiff {
                SizeMode::Extended
            } else {
                SizeMode::Classic
            };
            let request = StackRequest::new(&source, &out, &name, start, end)
                .with_split_every(split_every)
                .with_size_mode(size_mode);

            // Reject configuration errors before touching the output directory.
            request.validate()?;
            fs::create_dir_all(&out)?;
            ensure_writable_path(&request.container_path(0), cli.global.overwrite)?;

            let bar = if cli.global.progress {
                let bar = ProgressBar::new(request.frame_count());
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?;
                bar.set_style(style.progress_chars("##-"));
                Some(bar)
            } else {
                None
            };

            let options = StackOptions::new().with_progress(Arc::new(TerminalProgress {
                bar: bar.clone(),
                verbose: cli.global.verbose,
            }));

            let report = Stacker::new(request).with_options(options).run()?;

            if let Some(bar) = bar {
                bar.finish_and_clear();
            }

            if json {
                let payload = json!({
                    "frames_written": report.frames_written,
                    "frames_skipped": report.frames_skipped,
                    "files": report
                        .files
                        .iter()
                        .map(|path| path.display().to_string())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} {} frames into {} files ({} skipped)",
                    "stacked".green().bold(),
                    report.frames_written,
                    report.files.len(),
                    report.frames_skipped,
                );
                if cli.global.verbose {
                    for path in &report.files {
                        println!("  {}", path.display());
                    }
                }
            }
        }
        Commands::Scan {
            source,
            start,
            end,
            json,
        } => {
            if start > end {
                return Err("--start must be <= --end".into());
            }
            if !source.is_dir() {
                return Err(format!("source directory not found: {}", source.display()).into());
            }

            let summary = scan_range(&source, start, end);

            if json {
                let payload = json!({
                    "present": summary.present,
                    "missing": summary.missing.len(),
                    "missing_frames": summary.missing,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} present, {} missing in [{start}, {end}]",
                    summary.present,
                    summary.missing.len(),
                );
                if cli.global.verbose {
                    for number in &summary.missing {
                        println!("  missing {}", frame_path(&source, *number).display());
                    }
                }
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "rebundle", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
