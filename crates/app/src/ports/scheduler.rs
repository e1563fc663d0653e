//! Scheduler port: one-shot timers with explicit cancellation.

use std::fmt;
use std::time::Duration;

/// Work executed once a timer elapses.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules one-shot tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed.
    ///
    /// The returned handle is the only way to cancel the task. Dropping it
    /// leaves the task scheduled.
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Cancellation handle returned by [`Scheduler::schedule_after`].
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    /// Wrap the scheduler-specific cancellation routine.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the task. No-op if it already ran.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancelled", &self.cancel.is_none())
            .finish()
    }
}
