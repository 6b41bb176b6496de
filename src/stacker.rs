//! Split-aware stacking writer.
//!
//! [`Stacker`] consumes the frame sequence produced by
//! [`FrameSource`](crate::FrameSource) and assembles it into one or more
//! multi-frame containers, deciding before every frame whether to keep
//! writing to the current container or to rotate to a new one.
//!
//! Rotation fires, in this order of precedence:
//!
//! 1. no container is open yet (first written frame of the run);
//! 2. a count-based split is configured and the number of frames written so
//!    far is a multiple of it (skipped frames do not count);
//! 3. classic addressing is active and the next frame would push the open
//!    container past [`MAX_CLASSIC_CONTAINER_BYTES`].
//!
//! A single frame larger than the whole budget is still written, alone in
//! its own container, rather than rejected.
//!
//! # Example
//!
//! ```no_run
//! use rebundle::{StackRequest, Stacker};
//!
//! let request = StackRequest::new("shots", "archive", "master", 0, 7999)
//!     .with_split_every(2000);
//! let report = Stacker::new(request).run()?;
//! println!(
//!     "{} frames in {} files ({} skipped)",
//!     report.frames_written,
//!     report.files.len(),
//!     report.frames_skipped,
//! );
//! # Ok::<(), rebundle::RebundleError>(())
//! ```

use std::path::PathBuf;

use crate::container::{ContainerSession, ContainerSink, SizeMode};
use crate::decode::{FrameDecoder, ImageFrameDecoder};
use crate::error::RebundleError;
use crate::options::StackOptions;
use crate::progress::ProgressTracker;
use crate::request::StackRequest;
use crate::source::{FrameOutcome, FrameSource};
use crate::tiff::TiffContainerSink;

/// Maximum byte budget of one container under [`SizeMode::Classic`].
///
/// Classic TIFF offsets are 32-bit, capping a file at 4 GiB; 1 MiB is held
/// back for the directory metadata written at close time.
pub const MAX_CLASSIC_CONTAINER_BYTES: u64 = 4 * 1024 * 1024 * 1024 - 1024 * 1024;

/// Terminal summary of a successful stacking run.
///
/// A run over a range in which every frame file is missing succeeds with
/// zero files and zero written frames; distinguishing "nothing found" from
/// a misconfigured range is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct StackReport {
    /// Frames appended to containers, across all files.
    pub frames_written: u64,
    /// Frames skipped because their source file was missing.
    pub frames_skipped: u64,
    /// Paths of the generated container files, in index order.
    pub files: Vec<PathBuf>,
}

/// The split-aware stacking writer.
///
/// Owns the mutable run state (open container session, written-frame
/// counter, file index counter) for the lifetime of one run. Strictly
/// sequential: frames are sourced and written one at a time, in ascending
/// frame-number order.
pub struct Stacker {
    request: StackRequest,
    options: StackOptions,
}

/// One container currently open for writing.
struct OpenSession {
    index: u64,
    path: PathBuf,
    handle: Box<dyn ContainerSession>,
    accumulated_bytes: u64,
    frames_in_session: u64,
}

impl OpenSession {
    fn close(self) -> Result<(), RebundleError> {
        log::debug!(
            "Closing container {} (index {}, {} frames, {} bytes)",
            self.path.display(),
            self.index,
            self.frames_in_session,
            self.accumulated_bytes,
        );
        self.handle.finish()
    }
}

impl Stacker {
    /// Create a stacker for the given request.
    pub fn new(request: StackRequest) -> Self {
        Self {
            request,
            options: StackOptions::default(),
        }
    }

    /// Attach run options (progress callback, reporting cadence).
    #[must_use]
    pub fn with_options(mut self, options: StackOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute the run with the shipped TIFF codec and `image`-based
    /// frame decoder.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any output I/O; every
    /// decode or codec error aborts the run immediately. Partial container
    /// files from an aborted run are left on disk, since they may still
    /// contain recoverable frames.
    pub fn run(&self) -> Result<StackReport, RebundleError> {
        self.run_with(&TiffContainerSink, &ImageFrameDecoder)
    }

    /// Execute the run against injected codec and decode capabilities.
    ///
    /// This is the seam used by tests to substitute an in-memory recording
    /// sink for the real TIFF encoder.
    ///
    /// # Errors
    ///
    /// Same semantics as [`run`](Stacker::run).
    pub fn run_with(
        &self,
        sink: &dyn ContainerSink,
        decoder: &dyn FrameDecoder,
    ) -> Result<StackReport, RebundleError> {
        self.request.validate()?;

        let mut session: Option<OpenSession> = None;
        match self.drive(sink, decoder, &mut session) {
            Ok(report) => {
                if let Some(open) = session.take() {
                    open.close()?;
                }
                Ok(report)
            }
            Err(error) => {
                // Best-effort close so the container on disk keeps as many
                // finalized frames as possible; the run error still wins.
                if let Some(open) = session.take() {
                    let path = open.path.clone();
                    if let Err(close_error) = open.close() {
                        log::warn!(
                            "Failed to close container {} while aborting: {close_error}",
                            path.display(),
                        );
                    }
                }
                Err(error)
            }
        }
    }

    /// The sequential frame loop. The open session lives in `session` so
    /// the caller can close it on both the success and the error path.
    fn drive(
        &self,
        sink: &dyn ContainerSink,
        decoder: &dyn FrameDecoder,
        session: &mut Option<OpenSession>,
    ) -> Result<StackReport, RebundleError> {
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            self.request.frame_count(),
            self.options.batch_size,
        );

        let mut files: Vec<PathBuf> = Vec::new();
        let mut frames_written: u64 = 0;
        let mut frames_skipped: u64 = 0;
        let mut next_file_index: u64 = 0;

        let source = FrameSource::new(
            &self.request.source_dir,
            self.request.start_frame,
            self.request.end_frame,
            decoder,
        );

        for outcome in source {
            match outcome? {
                FrameOutcome::Skipped { number, path } => {
                    log::warn!(
                        "Frame file {} does not exist, skipping frame {number}",
                        path.display(),
                    );
                    self.options.progress.on_frame_skipped(number, &path);
                    frames_skipped += 1;
                    tracker.advance(Some(number), frames_written, frames_skipped);
                }
                FrameOutcome::Loaded { number, frame } => {
                    let open = match &mut *session {
                        Some(open)
                            if !self.needs_rotation(open, frames_written, frame.byte_size) =>
                        {
                            open
                        }
                        slot => {
                            if let Some(previous) = slot.take() {
                                previous.close()?;
                            }

                            let path = self.request.container_path(next_file_index);
                            log::debug!(
                                "Opening container {} (index {next_file_index})",
                                path.display(),
                            );
                            let handle = sink.open(&path, self.request.size_mode)?;
                            files.push(path.clone());

                            let index = next_file_index;
                            next_file_index += 1;
                            slot.insert(OpenSession {
                                index,
                                path,
                                handle,
                                accumulated_bytes: 0,
                                frames_in_session: 0,
                            })
                        }
                    };

                    let appended = open.handle.append(&frame.image)?;
                    open.accumulated_bytes += appended;
                    open.frames_in_session += 1;
                    frames_written += 1;
                    tracker.advance(Some(number), frames_written, frames_skipped);
                }
            }
        }

        tracker.finish(frames_written, frames_skipped);

        Ok(StackReport {
            frames_written,
            frames_skipped,
            files,
        })
    }

    /// Decide whether the next frame must go into a fresh container.
    ///
    /// Only consulted while a session is open; the first written frame of
    /// the run opens its container through the no-session path instead.
    /// Evaluated before the frame is appended, which is why the size check
    /// needs the next frame's byte size up front.
    fn needs_rotation(
        &self,
        open: &OpenSession,
        frames_written: u64,
        next_frame_bytes: u64,
    ) -> bool {
        if self
            .request
            .split_every
            .is_some_and(|every| frames_written % every.get() == 0)
        {
            return true;
        }

        self.request.size_mode == SizeMode::Classic
            && open.accumulated_bytes + next_frame_bytes > MAX_CLASSIC_CONTAINER_BYTES
    }
}
