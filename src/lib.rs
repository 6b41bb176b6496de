//! # rebundle
//!
//! Rebundle image sequences: stack a directory of sequentially numbered
//! single-frame TIFF files into a small number of large multi-frame
//! TIFF/BigTIFF containers, preserving frame order.
//!
//! `rebundle` is built for the offline batch-archival case: a capture rig
//! leaves behind tens of thousands of numbered frame files
//! (`00000000.tif`, `00000001.tif`, …) and they need to become a handful of
//! archival containers. The core is a split-aware writer that decides, for
//! each incoming frame, whether to keep appending to the current container
//! or to rotate to a new one:
//!
//! - under [`SizeMode::Classic`], a container is never knowingly grown past
//!   the classic-TIFF byte budget ([`MAX_CLASSIC_CONTAINER_BYTES`]);
//! - an explicit `split_every` forces a rotation every N written frames;
//! - under [`SizeMode::Extended`] (BigTIFF) with no `split_every`, the
//!   whole range lands in one file.
//!
//! Missing frame files are skipped and reported as progress events, never
//! errors; every frame that does exist ends up in exactly one container, in
//! ascending order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rebundle::{SizeMode, StackRequest, Stacker};
//!
//! let request = StackRequest::new("shots", "archive", "master", 0, 7999)
//!     .with_split_every(2000)
//!     .with_size_mode(SizeMode::Classic);
//!
//! let report = Stacker::new(request).run()?;
//! println!(
//!     "{} frames in {} files ({} skipped)",
//!     report.frames_written,
//!     report.files.len(),
//!     report.frames_skipped,
//! );
//! # Ok::<(), rebundle::RebundleError>(())
//! ```
//!
//! ## Observing a run
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rebundle::{ProgressCallback, ProgressInfo, StackOptions, StackRequest, Stacker};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:.1}% complete", info.percentage);
//!     }
//! }
//!
//! let request = StackRequest::new("shots", "archive", "master", 0, 99);
//! let options = StackOptions::new()
//!     .with_progress(Arc::new(PrintProgress))
//!     .with_batch_size(10);
//! Stacker::new(request).with_options(options).run()?;
//! # Ok::<(), rebundle::RebundleError>(())
//! ```
//!
//! ## Design
//!
//! - **Injected codec**: the writer drives the [`ContainerSink`] /
//!   [`ContainerSession`] traits rather than a concrete encoder, so it is
//!   testable against an in-memory fake. The shipped implementation,
//!   [`TiffContainerSink`], writes multi-page TIFF via the
//!   [`tiff`](https://crates.io/crates/tiff) crate.
//! - **Injected decoding**: single-frame sources are decoded through the
//!   [`FrameDecoder`] trait; [`ImageFrameDecoder`] uses the
//!   [`image`](https://crates.io/crates/image) crate.
//! - **Strictly sequential**: frames are sourced and written one at a
//!   time, in ascending order. A run proceeds to completion, to an
//!   unrecoverable error, or to exhaustion of the range; there is no
//!   cancellation primitive. Callers wanting a responsive UI run the whole
//!   thing on a worker thread.
//! - **No cleanup on failure**: a fatal error leaves partial containers on
//!   disk (closed best-effort), since they may still hold recoverable
//!   frames.

pub mod container;
pub mod decode;
pub mod error;
pub mod options;
pub mod progress;
pub mod request;
pub mod source;
pub mod stacker;
pub mod tiff;

pub use container::{ContainerSession, ContainerSink, SizeMode};
pub use decode::{DecodedFrame, FrameDecoder, ImageFrameDecoder};
pub use error::RebundleError;
pub use options::StackOptions;
pub use progress::{ProgressCallback, ProgressInfo};
pub use request::{CONTAINER_EXTENSION, StackRequest};
pub use source::{FRAME_EXTENSION, FrameOutcome, FrameSource, frame_path};
pub use stacker::{MAX_CLASSIC_CONTAINER_BYTES, StackReport, Stacker};
pub use tiff::TiffContainerSink;
