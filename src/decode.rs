//! Frame decode capability.
//!
//! Decoding a single-frame source file into pixel data is delegated to the
//! [`FrameDecoder`] trait so the stacking writer can be tested without real
//! image files. The shipped implementation, [`ImageFrameDecoder`], reads any
//! format the `image` crate understands.

use std::path::Path;

use image::DynamicImage;

use crate::error::RebundleError;

/// A decoded frame together with the byte size it will occupy in a container.
///
/// The size is the raw pixel payload of the decoded image, which is what the
/// stacking writer charges against the per-file byte budget. It is known
/// **before** the frame is committed to a container, which the rotation
/// decision depends on.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// The decoded raster image.
    pub image: DynamicImage,
    /// Raw pixel payload size in bytes.
    pub byte_size: u64,
}

/// Capability for decoding a single-frame source file.
pub trait FrameDecoder {
    /// Decode the frame file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RebundleError::FrameDecode`] if the file exists but is
    /// unreadable or corrupt. Decode failures are fatal for the whole run;
    /// callers must not retry.
    fn decode(&self, path: &Path) -> Result<DecodedFrame, RebundleError>;
}

/// Frame decoder backed by the `image` crate.
///
/// Handles every input format the `image` crate supports, selected by file
/// content and extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFrameDecoder;

impl FrameDecoder for ImageFrameDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedFrame, RebundleError> {
        let image = image::open(path).map_err(|error| RebundleError::FrameDecode {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        let byte_size = image.as_bytes().len() as u64;
        Ok(DecodedFrame { image, byte_size })
    }
}
