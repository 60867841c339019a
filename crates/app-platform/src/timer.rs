//! Cancellable one-shot timers
//!
//! [`schedule`] runs a callback once after a delay on the tokio runtime. The
//! returned [`ScheduledCallback`] owns the timer: dropping it (or calling
//! [`ScheduledCallback::cancel`]) guarantees the callback never runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to a pending callback
///
/// When dropped, the callback is cancelled if it has not fired yet.
#[derive(Debug)]
pub struct ScheduledCallback {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

/// Run `callback` once after `delay`
///
/// Must be called from within a tokio runtime.
pub fn schedule<F>(delay: Duration, callback: F) -> ScheduledCallback
where
    F: FnOnce() + Send + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let fired = Arc::new(AtomicBool::new(false));
    let fired_flag = Arc::clone(&fired);

    let handle = tokio::spawn(async move {
        tokio::select! {
            biased;
            // Resolves on an explicit cancel and when the handle is dropped
            _ = &mut stop_rx => {
                tracing::trace!("Scheduled callback cancelled");
            }
            _ = tokio::time::sleep(delay) => {
                fired_flag.store(true, Ordering::SeqCst);
                callback();
            }
        }
    });

    ScheduledCallback {
        stop_tx: Some(stop_tx),
        handle,
        fired,
    }
}

impl ScheduledCallback {
    /// Cancel the callback
    pub fn cancel(mut self) {
        self.stop();
    }

    /// Whether the callback has run
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Whether the callback is still waiting for its deadline
    pub fn is_pending(&self) -> bool {
        !self.has_fired() && !self.handle.is_finished()
    }

    fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if !self.has_fired() {
            self.handle.abort();
        }
    }
}

impl Drop for ScheduledCallback {
    fn drop(&mut self) {
        self.stop();
    }
}
