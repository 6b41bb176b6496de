//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring a stacking run
//! and [`ProgressInfo`] for detailed progress snapshots. Skipped-frame
//! notices are delivered through
//! [`ProgressCallback::on_frame_skipped`] so a front end can surface them
//! without treating them as errors.
//!
//! A run, once started, proceeds to completion, to an unrecoverable error,
//! or to exhaustion of the frame range; there is no cancellation primitive.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rebundle::{
//!     ProgressCallback, ProgressInfo, StackOptions, StackRequest, Stacker,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:.1}% complete", info.percentage);
//!     }
//! }
//!
//! let request = StackRequest::new("frames", "out", "stack", 0, 99);
//! let options = StackOptions::new().with_progress(Arc::new(PrintProgress));
//! let report = Stacker::new(request).with_options(options).run()?;
//! # Ok::<(), rebundle::RebundleError>(())
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of stacking progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled by
/// [`StackOptions::with_batch_size`](crate::StackOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// How many frame numbers of the requested range have been visited so
    /// far, counting both written and skipped frames.
    pub current: u64,
    /// Total frame numbers in the requested range.
    pub total: u64,
    /// Completion percentage (0.0 – 100.0).
    pub percentage: f32,
    /// Wall-clock time elapsed since the run started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// The frame number most recently visited.
    pub current_frame: Option<u64>,
    /// Frames successfully written to containers so far.
    pub frames_written: u64,
    /// Frames skipped because their source file was missing.
    pub frames_skipped: u64,
}

/// Trait for receiving progress updates during a stacking run.
///
/// Implementations must be [`Send`] and [`Sync`] because a caller may drive
/// the run on a worker thread while observing it from another.
///
/// Progress callbacks are **infallible**: they observe the run but cannot
/// halt it.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during the run.
    fn on_progress(&self, info: &ProgressInfo);

    /// Called once for every frame whose source file was missing.
    ///
    /// The default implementation discards the notice.
    fn on_frame_skipped(&self, frame_number: u64, path: &Path) {
        let _ = (frame_number, path);
    }
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: u64,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    /// Create a new tracker.
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, total: u64, batch_size: u64) -> Self {
        Self {
            callback,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// Record one visited frame and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(
        &mut self,
        frame_number: Option<u64>,
        frames_written: u64,
        frames_skipped: u64,
    ) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(frame_number, frames_written, frames_skipped);
            self.items_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self, frames_written: u64, frames_skipped: u64) {
        self.report(None, frames_written, frames_skipped);
    }

    fn report(&self, frame_number: Option<u64>, frames_written: u64, frames_skipped: u64) {
        let elapsed = self.start_time.elapsed();

        let percentage = if self.total > 0 {
            (self.current as f32 / self.total as f32) * 100.0
        } else {
            100.0
        };

        let estimated_remaining = if self.current > 0 {
            let remaining = self.total.saturating_sub(self.current);
            let per_item = elapsed / self.current as u32;
            Some(per_item * remaining as u32)
        } else {
            None
        };

        let info = ProgressInfo {
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            current_frame: frame_number,
            frames_written,
            frames_skipped,
        };

        self.callback.on_progress(&info);
    }
}
