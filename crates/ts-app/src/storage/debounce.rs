use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Holds at most one delayed task.
///
/// Scheduling replaces whatever is still waiting. Only the wait is
/// cancellable: once the delay elapses the task is detached and runs to
/// completion even if something new is scheduled meanwhile.
#[derive(Default)]
pub struct DebounceSlot {
    pending: Mutex<Option<AbortHandle>>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the waiting task, if any, and run `task` once `delay` has
    /// passed from now. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
            trace!("cancelled pending debounced task");
        }

        let deadline = Instant::now() + delay;
        let waiter = tokio::spawn(async move {
            sleep_until(deadline).await;
            tokio::spawn(task);
        });
        *pending = Some(waiter.abort_handle());
    }

    /// Whether a task is still waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
