//! Run requests.
//!
//! [`StackRequest`] is the immutable description of one stacking run: which
//! frame range to read, where to read it from, where the containers go, and
//! which split policy applies. A request is validated once, before any
//! output I/O begins; validation failures are configuration errors, distinct
//! from runtime I/O errors.
//!
//! # Example
//!
//! ```no_run
//! use rebundle::{SizeMode, StackRequest};
//!
//! let request = StackRequest::new("shots", "archive", "master", 0, 7999)
//!     .with_split_every(2000)
//!     .with_size_mode(SizeMode::Classic);
//! request.validate()?;
//! # Ok::<(), rebundle::RebundleError>(())
//! ```

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use crate::container::SizeMode;
use crate::error::RebundleError;

/// File extension of generated container files.
pub const CONTAINER_EXTENSION: &str = "tif";

/// The immutable description of one stacking run.
#[derive(Debug, Clone)]
pub struct StackRequest {
    /// First frame number of the inclusive range.
    pub start_frame: u64,
    /// Last frame number of the inclusive range.
    pub end_frame: u64,
    /// Directory containing the numbered single-frame files.
    pub source_dir: PathBuf,
    /// Directory the container files are written to.
    pub output_dir: PathBuf,
    /// File stem of generated containers; file `N` is named
    /// `{output_base_name}_{N}.tif`.
    pub output_base_name: String,
    /// Force a new container every N written frames, regardless of size.
    /// `None` disables count-based splitting.
    pub split_every: Option<NonZeroU64>,
    /// Container offset addressing mode. [`SizeMode::Classic`] keeps each
    /// file under the classic byte budget; [`SizeMode::Extended`] disables
    /// size-based splitting.
    pub size_mode: SizeMode,
}

impl StackRequest {
    /// Create a request for the inclusive range `[start_frame, end_frame]`
    /// with no count-based split and classic addressing.
    pub fn new<P1, P2, S>(
        source_dir: P1,
        output_dir: P2,
        output_base_name: S,
        start_frame: u64,
        end_frame: u64,
    ) -> Self
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        S: Into<String>,
    {
        Self {
            start_frame,
            end_frame,
            source_dir: source_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            output_base_name: output_base_name.into(),
            split_every: None,
            size_mode: SizeMode::default(),
        }
    }

    /// Force a new container every `frames` written frames.
    ///
    /// Skipped frames do not count towards the split. A value of 0 disables
    /// count-based splitting, matching the classic "0 means off" convention
    /// of batch tools.
    #[must_use]
    pub fn with_split_every(mut self, frames: u64) -> Self {
        self.split_every = NonZeroU64::new(frames);
        self
    }

    /// Set the container offset addressing mode.
    #[must_use]
    pub fn with_size_mode(mut self, mode: SizeMode) -> Self {
        self.size_mode = mode;
        self
    }

    /// Number of frame numbers in the requested range.
    pub fn frame_count(&self) -> u64 {
        self.end_frame
            .saturating_sub(self.start_frame)
            .saturating_add(1)
    }

    /// Derive the path of the container with the given 0-based index.
    pub fn container_path(&self, index: u64) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{index}.{CONTAINER_EXTENSION}",
            self.output_base_name
        ))
    }

    /// Check the request for configuration errors.
    ///
    /// Only the shape of the request and the existence of the source
    /// directory are checked here; individual frame files are probed lazily
    /// during the run.
    ///
    /// # Errors
    ///
    /// Returns [`RebundleError::InvalidFrameRange`] if the range is
    /// inverted, or [`RebundleError::SourceDirectory`] if the source
    /// directory does not exist.
    pub fn validate(&self) -> Result<(), RebundleError> {
        if self.start_frame > self.end_frame {
            return Err(RebundleError::InvalidFrameRange {
                start: self.start_frame,
                end: self.end_frame,
            });
        }

        if !self.source_dir.is_dir() {
            return Err(RebundleError::SourceDirectory {
                path: self.source_dir.clone(),
            });
        }

        Ok(())
    }
}
