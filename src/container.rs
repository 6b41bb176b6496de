//! Container codec capability.
//!
//! The stacking writer never serializes pixel data itself. It drives a pair
//! of object-safe traits, [`ContainerSink`] to create container files and
//! [`ContainerSession`] to append frames to one, so the concrete codec is an
//! injected capability. The shipped implementation is
//! [`TiffContainerSink`](crate::TiffContainerSink); tests substitute an
//! in-memory fake that records appended frames without touching disk.

use std::path::Path;

use image::DynamicImage;

use crate::error::RebundleError;

/// Offset addressing mode of the output container format.
///
/// Selects between the format's classic, capped addressing and its extended
/// 64-bit variant. For TIFF this is the choice between classic TIFF (32-bit
/// offsets, files must stay below 4 GiB) and BigTIFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Classic 32-bit offset addressing. Output files are kept below the
    /// format's practical size limit by rotating to a new container; see
    /// [`MAX_CLASSIC_CONTAINER_BYTES`](crate::MAX_CLASSIC_CONTAINER_BYTES).
    /// This is the default.
    #[default]
    Classic,
    /// Extended 64-bit offset addressing (BigTIFF). No practical size limit,
    /// so size-based splitting is disabled entirely.
    Extended,
}

/// Capability for creating multi-frame container files.
///
/// One [`open`](ContainerSink::open) call corresponds to exactly one output
/// file. The returned session must be driven to completion with
/// [`ContainerSession::finish`], even on the error path that aborts a run.
pub trait ContainerSink {
    /// Create a new container file for writing.
    ///
    /// # Errors
    ///
    /// Returns [`RebundleError::ContainerOpen`] if the file cannot be
    /// created or the container header cannot be written.
    fn open(&self, path: &Path, mode: SizeMode) -> Result<Box<dyn ContainerSession>, RebundleError>;
}

/// One container file currently open for writing.
pub trait ContainerSession {
    /// Write one decoded frame as the next image plane in the container.
    ///
    /// Returns the number of bytes the frame occupies, used by the writer
    /// for budget accounting.
    ///
    /// # Errors
    ///
    /// Returns [`RebundleError::ContainerAppend`] if the frame cannot be
    /// written (e.g. disk full).
    fn append(&mut self, image: &DynamicImage) -> Result<u64, RebundleError>;

    /// Finalize container metadata and release the file handle.
    ///
    /// Must be called exactly once per opened session. Consuming `self`
    /// makes a double close unrepresentable.
    ///
    /// # Errors
    ///
    /// Returns [`RebundleError::ContainerClose`] if finalization fails.
    fn finish(self: Box<Self>) -> Result<(), RebundleError>;
}
