//! Lazy, pull-based frame source iterator.
//!
//! [`FrameSource`] implements [`Iterator`] and visits every frame number in
//! an inclusive range in ascending order, yielding one [`FrameOutcome`] per
//! number. Frames are decoded on demand: each call to
//! [`next()`](Iterator::next) touches at most one file.
//!
//! A missing frame file yields [`FrameOutcome::Skipped`] and is never an
//! error; a file that exists but fails to decode is fatal and ends the
//! iteration.
//!
//! # Example
//!
//! ```no_run
//! use rebundle::{FrameOutcome, FrameSource, ImageFrameDecoder};
//!
//! let decoder = ImageFrameDecoder;
//! let source = FrameSource::new("frames", 0, 9, &decoder);
//!
//! for outcome in source {
//!     match outcome? {
//!         FrameOutcome::Loaded { number, frame } => {
//!             println!("frame {number}: {} bytes", frame.byte_size);
//!         }
//!         FrameOutcome::Skipped { number, .. } => {
//!             println!("frame {number} missing");
//!         }
//!     }
//! }
//! # Ok::<(), rebundle::RebundleError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::decode::{DecodedFrame, FrameDecoder};
use crate::error::RebundleError;

/// File extension of single-frame source files.
pub const FRAME_EXTENSION: &str = "tif";

/// Build the expected path of a numbered frame file.
///
/// Frame files are named by an 8-digit, zero-padded frame number with the
/// fixed [`FRAME_EXTENSION`], e.g. frame 42 in `shots/` is
/// `shots/00000042.tif`. Numbers wider than 8 digits are not truncated.
pub fn frame_path(directory: &Path, number: u64) -> PathBuf {
    directory.join(format!("{number:08}.{FRAME_EXTENSION}"))
}

/// The result of visiting one frame number in the requested range.
#[derive(Debug)]
pub enum FrameOutcome {
    /// The frame file existed and was decoded.
    Loaded {
        /// Frame number within the requested range.
        number: u64,
        /// Decoded image and its byte size.
        frame: DecodedFrame,
    },
    /// The frame file does not exist. Non-fatal; the writer skips it
    /// without advancing any split-related counters.
    Skipped {
        /// Frame number within the requested range.
        number: u64,
        /// The path that was probed.
        path: PathBuf,
    },
}

/// A lazy iterator over frame-load outcomes for an inclusive frame range.
///
/// Yields exactly one item per integer in `[start, end]`, in ascending
/// order, until exhausted or until a decode error occurs. After yielding an
/// error the iterator is fused and returns `None`.
///
/// There is no checkpointing: re-invoking with the same range restarts from
/// the beginning.
pub struct FrameSource<'a> {
    directory: PathBuf,
    next: u64,
    end: u64,
    finished: bool,
    decoder: &'a dyn FrameDecoder,
}

impl<'a> FrameSource<'a> {
    /// Create a source over the inclusive range `[start, end]`.
    ///
    /// A range with `start > end` is empty and yields nothing.
    pub fn new<P: AsRef<Path>>(
        directory: P,
        start: u64,
        end: u64,
        decoder: &'a dyn FrameDecoder,
    ) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            next: start,
            end,
            finished: start > end,
            decoder,
        }
    }
}

impl Iterator for FrameSource<'_> {
    type Item = Result<FrameOutcome, RebundleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let number = self.next;
        // The range end is inclusive; stepping past u64::MAX must not wrap.
        if number >= self.end {
            self.finished = true;
        } else {
            self.next += 1;
        }

        let path = frame_path(&self.directory, number);
        if !path.exists() {
            return Some(Ok(FrameOutcome::Skipped { number, path }));
        }

        match self.decoder.decode(&path) {
            Ok(frame) => Some(Ok(FrameOutcome::Loaded { number, frame })),
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
