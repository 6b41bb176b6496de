//! Multi-frame TIFF codec.
//!
//! [`TiffContainerSink`] is the shipped [`ContainerSink`] implementation. It
//! writes one TIFF image directory per appended frame, producing a standard
//! multi-page TIFF. [`SizeMode::Classic`] selects classic 32-bit offset
//! addressing; [`SizeMode::Extended`] selects BigTIFF.
//!
//! Frames whose color model has a native TIFF encoding (8/16-bit grayscale,
//! RGB, and RGBA) are written as-is; anything else is converted to 8-bit RGB
//! before writing.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tiff::TiffError;
use tiff::encoder::{TiffEncoder, TiffKind, TiffKindBig, TiffKindStandard, colortype};

use crate::container::{ContainerSession, ContainerSink, SizeMode};
use crate::error::RebundleError;

/// TIFF implementation of the container codec capability.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use image::DynamicImage;
/// use rebundle::{ContainerSink, SizeMode, TiffContainerSink};
///
/// let mut session = TiffContainerSink.open(Path::new("stack_0.tif"), SizeMode::Classic)?;
/// session.append(&DynamicImage::new_luma8(640, 480))?;
/// session.finish()?;
/// # Ok::<(), rebundle::RebundleError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffContainerSink;

impl ContainerSink for TiffContainerSink {
    fn open(&self, path: &Path, mode: SizeMode) -> Result<Box<dyn ContainerSession>, RebundleError> {
        let open_error = |reason: String| RebundleError::ContainerOpen {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::create(path).map_err(|error| open_error(error.to_string()))?;
        // Second handle onto the same file description, fsynced at close so
        // close-time failures surface instead of vanishing in a drop.
        let sync_handle = file
            .try_clone()
            .map_err(|error| open_error(error.to_string()))?;

        let encoder = match mode {
            SizeMode::Classic => PageEncoder::Classic(
                TiffEncoder::new(file).map_err(|error| open_error(error.to_string()))?,
            ),
            SizeMode::Extended => PageEncoder::Extended(
                TiffEncoder::new_big(file).map_err(|error| open_error(error.to_string()))?,
            ),
        };

        Ok(Box::new(TiffSession {
            path: path.to_path_buf(),
            encoder,
            file: sync_handle,
        }))
    }
}

enum PageEncoder {
    Classic(TiffEncoder<File, TiffKindStandard>),
    Extended(TiffEncoder<File, TiffKindBig>),
}

struct TiffSession {
    path: PathBuf,
    encoder: PageEncoder,
    file: File,
}

impl ContainerSession for TiffSession {
    fn append(&mut self, image: &DynamicImage) -> Result<u64, RebundleError> {
        match &mut self.encoder {
            PageEncoder::Classic(encoder) => write_page(encoder, image),
            PageEncoder::Extended(encoder) => write_page(encoder, image),
        }
        .map_err(|error| RebundleError::ContainerAppend {
            path: self.path.clone(),
            reason: error.to_string(),
        })?;

        Ok(image.as_bytes().len() as u64)
    }

    fn finish(self: Box<Self>) -> Result<(), RebundleError> {
        let TiffSession {
            path,
            encoder,
            file,
        } = *self;

        // Each page is fully written by `append`; dropping the encoder only
        // releases its file handle.
        drop(encoder);

        file.sync_all()
            .map_err(|error| RebundleError::ContainerClose {
                path,
                reason: error.to_string(),
            })
    }
}

/// Write one frame as the next image directory of the container.
fn write_page<W, K>(encoder: &mut TiffEncoder<W, K>, image: &DynamicImage) -> Result<(), TiffError>
where
    W: Write + Seek,
    K: TiffKind,
{
    match image {
        DynamicImage::ImageLuma8(buffer) => {
            encoder.write_image::<colortype::Gray8>(buffer.width(), buffer.height(), buffer.as_raw())
        }
        DynamicImage::ImageLuma16(buffer) => encoder.write_image::<colortype::Gray16>(
            buffer.width(),
            buffer.height(),
            buffer.as_raw(),
        ),
        DynamicImage::ImageRgb8(buffer) => {
            encoder.write_image::<colortype::RGB8>(buffer.width(), buffer.height(), buffer.as_raw())
        }
        DynamicImage::ImageRgba8(buffer) => {
            encoder.write_image::<colortype::RGBA8>(buffer.width(), buffer.height(), buffer.as_raw())
        }
        DynamicImage::ImageRgb16(buffer) => {
            encoder.write_image::<colortype::RGB16>(buffer.width(), buffer.height(), buffer.as_raw())
        }
        DynamicImage::ImageRgba16(buffer) => encoder.write_image::<colortype::RGBA16>(
            buffer.width(),
            buffer.height(),
            buffer.as_raw(),
        ),
        other => {
            // Color models without a native TIFF encoding (alpha grayscale,
            // floating point) are flattened to 8-bit RGB.
            let converted = other.to_rgb8();
            encoder.write_image::<colortype::RGB8>(
                converted.width(),
                converted.height(),
                converted.as_raw(),
            )
        }
    }
}
