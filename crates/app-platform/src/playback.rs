//! Best-effort video playback start
//!
//! Platforms may defer starting playback of a freshly attached stream
//! (autoplay policies, element not yet laid out). [`start_playback`] keeps
//! retrying on a fixed interval until the surface reports success or the
//! returned handle is dropped.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Playback start failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform did not start playback yet
    #[error("Playback deferred: {0}")]
    Deferred(String),
}

/// Something that can display the camera stream
#[async_trait]
pub trait PlaybackSurface: Send + Sync {
    /// Try to start playback
    async fn play(&self) -> Result<(), PlaybackError>;
}

/// Handle to a running playback retry loop
///
/// Dropping the handle stops retrying.
#[derive(Debug)]
pub struct PlaybackHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    started: Arc<AtomicBool>,
    attempts: Arc<AtomicU32>,
}

impl PlaybackHandle {
    /// Whether playback has started
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of play attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Stop retrying
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Spawn a loop that calls `surface.play()` until it succeeds
pub fn start_playback(surface: Arc<dyn PlaybackSurface>, retry_interval: Duration) -> PlaybackHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let started = Arc::new(AtomicBool::new(false));
    let attempts = Arc::new(AtomicU32::new(0));
    let started_flag = Arc::clone(&started);
    let attempt_count = Arc::clone(&attempts);

    let handle = tokio::spawn(async move {
        loop {
            attempt_count.fetch_add(1, Ordering::SeqCst);
            match surface.play().await {
                Ok(()) => {
                    started_flag.store(true, Ordering::SeqCst);
                    tracing::debug!(
                        attempts = attempt_count.load(Ordering::SeqCst),
                        "Video playback started"
                    );
                    break;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Video playback not started, retrying");
                }
            }

            tokio::select! {
                biased;
                _ = &mut stop_rx => break,
                _ = tokio::time::sleep(retry_interval) => {}
            }
        }
    });

    PlaybackHandle {
        stop_tx: Some(stop_tx),
        handle,
        started,
        attempts,
    }
}
