//! [`Scheduler`] backed by tokio timers.

use std::time::Duration;

use tokio::runtime::Handle;

use crate::ports::{Scheduler, TimerHandle, TimerTask};

/// Runs each scheduled task on its own tokio task after a `sleep`.
///
/// Cancelling the returned [`TimerHandle`] aborts the task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Scheduler bound to the runtime of the caller, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle::new(move || join.abort())
    }
}
