//! Cancellable delayed task.
//!
//! The feed signals loading progress with a fixed artificial delay before a
//! non-initial batch lands. The delay is a spawned timer that can be
//! cancelled when the filter changes, so a stale batch is never appended.

use std::time::Duration;

use tokio::sync::oneshot;

/// Handle to a pending delayed task.
///
/// Dropping the handle without calling [`cancel`](DelayHandle::cancel) lets
/// the task run to completion.
pub struct DelayHandle {
    cancel: Option<oneshot::Sender<()>>,
}

impl DelayHandle {
    /// Cancel the pending task.
    ///
    /// If the timer has not fired when the cancel is observed, the completion
    /// closure never runs. Cancelling an already-completed task is a no-op.
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel.take() {
            // Err means the task already finished; nothing to cancel.
            let _ = tx.send(());
        }
    }
}

/// Run `on_complete` after `duration`, unless cancelled first.
///
/// The cancel branch is polled before the timer, so a cancel that arrives
/// while both are ready always wins.
pub fn start_delayed_task<F>(duration: Duration, on_complete: F) -> DelayHandle
where
    F: FnOnce() + Send + 'static,
{
    let (tx, mut rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);
        tokio::select! {
            biased;
            res = &mut rx => {
                if res.is_ok() {
                    log::trace!("delayed task cancelled before firing");
                    return;
                }
                // Handle dropped without cancelling; run out the timer.
                sleep.await;
                on_complete();
            }
            _ = &mut sleep => on_complete(),
        }
    });
    DelayHandle { cancel: Some(tx) }
}

#[cfg(test)]
#[path = "tests/delay_tests.rs"]
mod tests;
