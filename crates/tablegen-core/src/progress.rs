//! Progress reporting and cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Receives progress notifications during a generation run.
///
/// Every method has a no-op default. [`check_cancel`](Self::check_cancel) is
/// called before each unit of introspection work and before every file
/// write; returning `Err(Error::Cancelled)` stops the run.
pub trait ProgressCallback {
    /// Introspection is starting with `total_tasks` steps.
    fn introspection_started(&mut self, _total_tasks: usize) {}

    /// Rendering is starting with `total_tasks` steps.
    fn generation_started(&mut self, _total_tasks: usize) {}

    /// Writing is starting with `total_tasks` files.
    fn save_started(&mut self, _total_tasks: usize) {}

    /// A named unit of work is starting.
    fn start_task(&mut self, _task_name: &str) {}

    /// The run finished.
    fn done(&mut self) {}

    /// Return `Err(Error::Cancelled)` to stop the run.
    fn check_cancel(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Ignores every notification and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {}

/// Cancellation switch that can be flipped from another thread.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl ProgressCallback for CancellationFlag {
    fn start_task(&mut self, task_name: &str) {
        tracing::trace!(task = task_name, "Task started");
    }

    fn check_cancel(&mut self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
