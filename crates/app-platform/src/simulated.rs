//! Simulated platform services
//!
//! Scriptable stand-ins for the capture devices, the playback surface and
//! the share sheet. The demo binary runs on these, and tests use them to
//! check that every acquired track is eventually stopped.

use crate::capture::{
    CaptureBackend, CaptureError, MediaKind, MediaRequest, MediaStream, MediaTrack, Result,
};
use crate::playback::{PlaybackError, PlaybackSurface};
use crate::share::{ShareError, SharePayload, ShareTarget};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// How the simulated device answers a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    /// Return one live track
    Grant,
    /// Refuse access with a reason
    Deny(String),
    /// Report the capability as missing
    Unsupported,
    /// Return a stream with no tracks
    Empty,
    /// Never answer
    Pending,
}

struct SimulatedTrack {
    kind: MediaKind,
    live: Arc<AtomicBool>,
}

impl MediaTrack for SimulatedTrack {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

/// Capture backend that hands out fake tracks
pub struct SimulatedCaptureBackend {
    video: Mutex<SimulatedOutcome>,
    audio: Mutex<SimulatedOutcome>,
    issued: Mutex<Vec<(MediaKind, Arc<AtomicBool>)>>,
    requests: Mutex<Vec<MediaRequest>>,
}

impl SimulatedCaptureBackend {
    /// Backend that grants every request
    pub fn new() -> Self {
        Self {
            video: Mutex::new(SimulatedOutcome::Grant),
            audio: Mutex::new(SimulatedOutcome::Grant),
            issued: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Change how requests for a device kind are answered
    pub fn set_outcome(&self, kind: MediaKind, outcome: SimulatedOutcome) {
        match kind {
            MediaKind::Video => *self.video.lock() = outcome,
            MediaKind::Audio => *self.audio.lock() = outcome,
        }
    }

    /// Tracks handed out and not yet stopped, across all sessions
    pub fn live_tracks(&self, kind: MediaKind) -> usize {
        self.issued
            .lock()
            .iter()
            .filter(|(k, live)| *k == kind && live.load(Ordering::SeqCst))
            .count()
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<MediaRequest> {
        self.requests.lock().clone()
    }

    fn outcome(&self, kind: MediaKind) -> SimulatedOutcome {
        match kind {
            MediaKind::Video => self.video.lock().clone(),
            MediaKind::Audio => self.audio.lock().clone(),
        }
    }
}

impl Default for SimulatedCaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureBackend for SimulatedCaptureBackend {
    fn is_supported(&self, kind: MediaKind) -> bool {
        self.outcome(kind) != SimulatedOutcome::Unsupported
    }

    async fn acquire(&self, request: MediaRequest) -> Result<MediaStream> {
        let kind = request.kind();
        self.requests.lock().push(request);

        match self.outcome(kind) {
            SimulatedOutcome::Grant => {
                let live = Arc::new(AtomicBool::new(true));
                self.issued.lock().push((kind, Arc::clone(&live)));
                Ok(MediaStream::new(vec![Box::new(SimulatedTrack { kind, live })]))
            }
            SimulatedOutcome::Empty => Ok(MediaStream::new(Vec::new())),
            SimulatedOutcome::Deny(reason) => Err(CaptureError::AccessFailed { kind, reason }),
            SimulatedOutcome::Unsupported => Err(CaptureError::Unsupported(kind)),
            SimulatedOutcome::Pending => std::future::pending().await,
        }
    }
}

/// Playback surface that defers the first `failures` attempts
#[derive(Debug)]
pub struct DeferringSurface {
    failures: u32,
    attempts: AtomicU32,
}

impl DeferringSurface {
    /// Surface that starts on attempt `failures + 1`
    pub fn new(failures: u32) -> Self {
        Self {
            failures,
            attempts: AtomicU32::new(0),
        }
    }

    /// Attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaybackSurface for DeferringSurface {
    async fn play(&self) -> std::result::Result<(), PlaybackError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            Err(PlaybackError::Deferred("element not ready".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Share target that records payloads
#[derive(Debug, Default)]
pub struct RecordingShareTarget {
    shared: Mutex<Vec<SharePayload>>,
    failure: Option<ShareError>,
}

impl RecordingShareTarget {
    /// Target that accepts every share
    pub fn new() -> Self {
        Self::default()
    }

    /// Target that answers every share with `error`
    pub fn failing(error: ShareError) -> Self {
        Self {
            shared: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    /// Payloads shared so far
    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().clone()
    }
}

#[async_trait]
impl ShareTarget for RecordingShareTarget {
    async fn share(&self, payload: &SharePayload) -> std::result::Result<(), ShareError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.shared.lock().push(payload.clone());
        Ok(())
    }
}
