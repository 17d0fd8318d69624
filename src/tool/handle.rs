// ABOUTME: Implements InvocationHandle for spawned tool invocations.
// ABOUTME: Supports waiting, waiting with a deadline, and cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::{ErrorKind, InvocationContext, InvocationResult, ToolAdapter};

/// Handle to an invocation running on the tokio runtime.
///
/// `join` always yields an `InvocationResult`; a cancelled or aborted
/// invocation settles with `ErrorKind::Cancelled`.
pub struct InvocationHandle {
    cancel: Arc<Notify>,
    task: JoinHandle<InvocationResult>,
}

impl InvocationHandle {
    pub(crate) fn spawn(adapter: Arc<ToolAdapter>, context: InvocationContext) -> Self {
        let cancel = Arc::new(Notify::new());
        let signal = Arc::clone(&cancel);
        let task = tokio::spawn(async move {
            adapter
                .invoke_with_cancel(context, async move { signal.notified().await })
                .await
        });
        Self { cancel, task }
    }

    /// Ask the invocation to stop.
    ///
    /// Returns true if it was still running when cancel was called.
    pub fn cancel(&self) -> bool {
        if self.task.is_finished() {
            return false;
        }
        // notify_one stores a permit, so a cancel that races ahead of the
        // task's first poll is still observed.
        self.cancel.notify_one();
        true
    }

    /// Returns true once the invocation has settled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the invocation to settle.
    pub async fn join(self) -> InvocationResult {
        match self.task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => {
                InvocationResult::failed(ErrorKind::Cancelled, "invocation task was aborted")
            }
            Err(_) => {
                InvocationResult::failed(ErrorKind::ExecutionFailed, "invocation task panicked")
            }
        }
    }

    /// Wait up to `timeout`; cancel the invocation and wait for it to settle
    /// if the deadline passes first.
    pub async fn join_with_timeout(mut self, timeout: Duration) -> InvocationResult {
        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) if err.is_cancelled() => {
                InvocationResult::failed(ErrorKind::Cancelled, "invocation task was aborted")
            }
            Ok(Err(_)) => {
                InvocationResult::failed(ErrorKind::ExecutionFailed, "invocation task panicked")
            }
            Err(_) => {
                self.cancel.notify_one();
                let mut result = self.join().await;
                let cancelled = result.error.as_mut().filter(|e| e.kind == ErrorKind::Cancelled);
                if let Some(err) = cancelled {
                    err.kind = ErrorKind::Timeout;
                    err.message =
                        format!("invocation did not settle within {}ms", timeout.as_millis());
                }
                result
            }
        }
    }
}
