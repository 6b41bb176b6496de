//! Run options.
//!
//! [`StackOptions`] threads progress callbacks and reporting cadence through
//! a stacking run without polluting the [`StackRequest`](crate::StackRequest)
//! value object, which describes *what* to stack rather than *how* to
//! observe it.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};

/// Operational settings for a stacking run.
///
/// All fields have sensible defaults; a default-constructed value behaves
/// identically to running with no observer at all.
#[derive(Clone)]
pub struct StackOptions {
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N frames).
    /// Defaults to 1 (every frame).
    pub(crate) batch_size: u64,
}

impl Debug for StackOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StackOptions")
            .field("has_progress", &true)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for StackOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl StackOptions {
    /// Create options with default settings.
    ///
    /// Defaults: no progress callback, batch size 1.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every
    /// [`batch_size`](StackOptions::with_batch_size) frames during the run,
    /// plus once unconditionally at the end.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every frame; 10 means every 10th frame.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }
}
