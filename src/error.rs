//! Error types for the `rebundle` crate.
//!
//! This module defines [`RebundleError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry rich context to aid
//! debugging, including file paths and upstream error messages.
//!
//! Missing source frames are deliberately **not** represented here: a missing
//! frame file is a skippable progress event
//! ([`FrameOutcome::Skipped`](crate::FrameOutcome)), never a run-level error.

use std::{io::Error as IoError, path::PathBuf};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `rebundle` operations.
///
/// Every public method that can fail returns `Result<T, RebundleError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RebundleError {
    /// The requested frame range is inverted.
    ///
    /// Rejected before any file I/O begins.
    #[error("Invalid frame range: start ({start}) must not exceed end ({end})")]
    InvalidFrameRange {
        /// First frame number of the requested range.
        start: u64,
        /// Last frame number of the requested range.
        end: u64,
    },

    /// The source directory does not exist or is not a directory.
    ///
    /// Rejected before any file I/O begins.
    #[error("Source directory not found at {path}")]
    SourceDirectory {
        /// Path that was passed as the frame source directory.
        path: PathBuf,
    },

    /// A frame file exists but could not be decoded.
    ///
    /// This is fatal for the whole run: a corrupted single-frame input is not
    /// a condition the writer can compensate for.
    #[error("Failed to decode frame at {path}: {reason}")]
    FrameDecode {
        /// Path of the offending frame file.
        path: PathBuf,
        /// Underlying reason the decode failed.
        reason: String,
    },

    /// A container file could not be created.
    #[error("Failed to open container at {path}: {reason}")]
    ContainerOpen {
        /// Path of the container that failed to open.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// A frame could not be appended to an open container.
    #[error("Failed to append frame to container at {path}: {reason}")]
    ContainerAppend {
        /// Path of the container being written.
        path: PathBuf,
        /// Underlying reason the append failed.
        reason: String,
    },

    /// A container could not be finalized.
    #[error("Failed to finalize container at {path}: {reason}")]
    ContainerClose {
        /// Path of the container being closed.
        path: PathBuf,
        /// Underlying reason the close failed.
        reason: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame decoding.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}
