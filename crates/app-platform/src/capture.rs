//! Camera and microphone capture
//!
//! A [`CaptureSession`] acquires devices through a [`CaptureBackend`] and
//! keeps the resulting [`MediaStream`]s as scoped resources: every track is
//! stopped when the device is disabled, when the session is torn down, and
//! when the session is dropped.
//!
//! Video and audio are independent slots. Each moves through
//! `Idle -> Requesting -> Connected | Failed`; disabling a slot releases its
//! tracks and returns it to `Idle`.
//!
//! Acquisition runs in the background: a request moves the slot to
//! `Requesting` right away and the owner renders that state until the
//! platform answers.
//!
//! Failures never escape the session. They are stored as
//! [`CaptureStatus::Failed`] with a user-facing message and can be retried.

use crate::playback::{start_playback, PlaybackHandle, PlaybackSurface};
use app_core::config::{CaptureConfig, Resolution};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

// =============================================================================
// Requests
// =============================================================================

/// Kind of capture device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Camera
    Video,
    /// Microphone
    Audio,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => f.write_str("camera"),
            MediaKind::Audio => f.write_str("microphone"),
        }
    }
}

/// Which camera to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    #[default]
    User,
    /// Rear camera
    Environment,
}

/// Video request constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    /// Camera selection
    pub facing: FacingMode,
    /// Preferred resolution
    pub ideal: Resolution,
    /// Minimum acceptable resolution
    pub minimum: Resolution,
}

impl From<&CaptureConfig> for VideoConstraints {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            facing: FacingMode::User,
            ideal: config.ideal,
            minimum: config.minimum,
        }
    }
}

/// A device request handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRequest {
    /// Camera with constraints
    Video(VideoConstraints),
    /// Microphone
    Audio,
}

impl MediaRequest {
    /// Device kind requested
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaRequest::Video(_) => MediaKind::Video,
            MediaRequest::Audio => MediaKind::Audio,
        }
    }
}

// =============================================================================
// Errors and status
// =============================================================================

/// Capture failures
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CaptureError {
    /// The platform has no such capability
    #[error("{0} capture is not supported on this device")]
    Unsupported(MediaKind),

    /// Permission refused or hardware unavailable
    #[error("Could not access the {kind}: {reason}")]
    AccessFailed {
        /// Device kind
        kind: MediaKind,
        /// Platform-provided reason
        reason: String,
    },

    /// A stream came back without a usable track
    #[error("No {0} track available")]
    NoTrack(MediaKind),
}

impl CaptureError {
    /// Device the error refers to
    pub fn kind(&self) -> MediaKind {
        match self {
            CaptureError::Unsupported(kind) | CaptureError::NoTrack(kind) => *kind,
            CaptureError::AccessFailed { kind, .. } => *kind,
        }
    }

    /// Message suitable for display next to the retry button
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::Unsupported(kind) => {
                format!("Your browser doesn't support {kind} access.")
            }
            CaptureError::AccessFailed { kind, .. } => {
                format!("Unable to access the {kind}. Please check permissions and try again.")
            }
            CaptureError::NoTrack(kind) => {
                format!("No {kind} found. Please connect a device and try again.")
            }
        }
    }
}

/// Result type for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Status of one device slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum CaptureStatus {
    /// Nothing acquired
    #[default]
    Idle,
    /// Waiting on the platform
    Requesting,
    /// Tracks are live
    Connected,
    /// Acquisition failed
    Failed(CaptureError),
}

impl CaptureStatus {
    /// Whether tracks are live
    pub fn is_connected(&self) -> bool {
        matches!(self, CaptureStatus::Connected)
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, CaptureStatus::Requesting)
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&CaptureError> {
        match self {
            CaptureStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the UI should offer a retry
    pub fn can_retry(&self) -> bool {
        self.error().is_some()
    }
}

// =============================================================================
// Streams
// =============================================================================

/// A single live track from a capture device
pub trait MediaTrack: Send + Sync {
    /// Device kind
    fn kind(&self) -> MediaKind;

    /// Whether the track is still producing media
    fn is_live(&self) -> bool;

    /// Stop the track and release the device
    fn stop(&self);
}

/// Tracks returned by one acquisition
///
/// Dropping the stream stops every track it holds.
pub struct MediaStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl MediaStream {
    /// Wrap acquired tracks
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    /// Number of live tracks of a kind
    pub fn live_tracks(&self, kind: MediaKind) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.kind() == kind && t.is_live())
            .count()
    }

    /// Stop every track
    pub fn stop(&mut self) {
        for track in self.tracks.drain(..) {
            track.stop();
        }
    }
}

impl fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaStream")
            .field("video", &self.live_tracks(MediaKind::Video))
            .field("audio", &self.live_tracks(MediaKind::Audio))
            .finish()
    }
}

impl Drop for MediaStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Platform access to capture devices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Whether the platform can capture this kind of media at all
    fn is_supported(&self, kind: MediaKind) -> bool;

    /// Request a device
    async fn acquire(&self, request: MediaRequest) -> Result<MediaStream>;
}

// =============================================================================
// Session
// =============================================================================

/// Status of both device slots
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    /// Camera
    pub video: CaptureStatus,
    /// Microphone
    pub audio: CaptureStatus,
}

impl CaptureSnapshot {
    /// Status of one device
    pub fn status(&self, kind: MediaKind) -> &CaptureStatus {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    /// Whether no request is in flight
    pub fn is_settled(&self) -> bool {
        !self.video.is_loading() && !self.audio.is_loading()
    }
}

#[derive(Debug)]
struct DeviceSlot {
    kind: MediaKind,
    status: CaptureStatus,
    stream: Option<MediaStream>,
    request: Option<JoinHandle<()>>,
    generation: u64,
}

impl DeviceSlot {
    fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            status: CaptureStatus::Idle,
            stream: None,
            request: None,
            generation: 0,
        }
    }

    /// Drop any in-flight request and stop held tracks
    fn release(&mut self) {
        self.generation += 1;
        if let Some(request) = self.request.take() {
            request.abort();
            tracing::debug!(kind = %self.kind, "Abandoned pending capture request");
        }
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(kind = %self.kind, "Released capture device");
        }
        self.status = CaptureStatus::Idle;
    }

    fn complete(&mut self, result: Result<MediaStream>) {
        self.request = None;
        match result {
            Ok(stream) if stream.live_tracks(self.kind) == 0 => {
                // Dropping the stream stops whatever it did return
                drop(stream);
                tracing::warn!(kind = %self.kind, "Stream returned without a usable track");
                self.status = CaptureStatus::Failed(CaptureError::NoTrack(self.kind));
            }
            Ok(stream) => {
                tracing::info!(kind = %self.kind, "Capture device connected");
                self.stream = Some(stream);
                self.status = CaptureStatus::Connected;
            }
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "Capture request failed");
                self.status = CaptureStatus::Failed(err);
            }
        }
    }

    fn live_tracks(&self) -> usize {
        self.stream
            .as_ref()
            .map(|s| s.live_tracks(self.kind))
            .unwrap_or(0)
    }
}

struct SessionInner {
    video: DeviceSlot,
    audio: DeviceSlot,
    torn_down: bool,
    status_tx: watch::Sender<CaptureSnapshot>,
}

impl SessionInner {
    fn slot(&self, kind: MediaKind) -> &DeviceSlot {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    fn slot_mut(&mut self, kind: MediaKind) -> &mut DeviceSlot {
        match kind {
            MediaKind::Video => &mut self.video,
            MediaKind::Audio => &mut self.audio,
        }
    }

    fn publish(&self) {
        self.status_tx.send_replace(CaptureSnapshot {
            video: self.video.status.clone(),
            audio: self.audio.status.clone(),
        });
    }
}

/// Scoped camera/microphone session owned by one screen
///
/// Requests run as background tasks owned by the session, so asking for a
/// device never blocks the caller. Status changes are published on a
/// `watch` channel. A request that completes after its slot was released
/// or re-requested has its stream stopped on arrival.
pub struct CaptureSession {
    backend: Arc<dyn CaptureBackend>,
    config: CaptureConfig,
    inner: Arc<Mutex<SessionInner>>,
    status_rx: watch::Receiver<CaptureSnapshot>,
    playback: Option<PlaybackHandle>,
}

impl CaptureSession {
    /// Create an idle session
    pub fn new(backend: Arc<dyn CaptureBackend>, config: CaptureConfig) -> Self {
        let (status_tx, status_rx) = watch::channel(CaptureSnapshot::default());
        Self {
            backend,
            config,
            inner: Arc::new(Mutex::new(SessionInner {
                video: DeviceSlot::new(MediaKind::Video),
                audio: DeviceSlot::new(MediaKind::Audio),
                torn_down: false,
                status_tx,
            })),
            status_rx,
            playback: None,
        }
    }

    /// Ask for the front camera without waiting
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_camera(&mut self) -> CaptureStatus {
        self.request(MediaRequest::Video(VideoConstraints::from(&self.config)))
    }

    /// Ask for the microphone without waiting
    pub fn request_microphone(&mut self) -> CaptureStatus {
        self.request(MediaRequest::Audio)
    }

    /// Acquire the front camera and wait for the answer
    pub async fn start_camera(&mut self) -> CaptureStatus {
        self.request_camera();
        self.wait_for(MediaKind::Video).await
    }

    /// Release the camera
    pub fn stop_camera(&mut self) {
        self.playback = None;
        self.release(MediaKind::Video);
    }

    /// Acquire the microphone and wait for the answer
    pub async fn enable_microphone(&mut self) -> CaptureStatus {
        self.request_microphone();
        self.wait_for(MediaKind::Audio).await
    }

    /// Release the microphone
    pub fn disable_microphone(&mut self) {
        self.release(MediaKind::Audio);
    }

    /// Enable or disable the microphone and wait for the answer
    pub async fn set_microphone(&mut self, enabled: bool) -> CaptureStatus {
        if enabled {
            self.enable_microphone().await
        } else {
            self.disable_microphone();
            self.audio_status()
        }
    }

    /// Re-request every device that failed or is still waiting
    ///
    /// Returns whether anything was re-requested.
    pub fn retry(&mut self) -> bool {
        let mut retried = false;
        for kind in [MediaKind::Video, MediaKind::Audio] {
            let stalled = {
                let inner = self.inner.lock();
                let status = &inner.slot(kind).status;
                status.can_retry() || status.is_loading()
            };
            if !stalled {
                continue;
            }
            self.release(kind);
            match kind {
                MediaKind::Video => self.request_camera(),
                MediaKind::Audio => self.request_microphone(),
            };
            retried = true;
        }
        retried
    }

    /// Wait until no request is in flight
    pub async fn settled(&self) -> CaptureSnapshot {
        let mut rx = self.status_rx.clone();
        let snapshot = match rx.wait_for(CaptureSnapshot::is_settled).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        snapshot
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<CaptureSnapshot> {
        self.status_rx.clone()
    }

    /// Current status of both devices
    pub fn snapshot(&self) -> CaptureSnapshot {
        self.status_rx.borrow().clone()
    }

    /// Start video playback on a surface, retrying until it succeeds
    ///
    /// Returns `false` when no camera is connected.
    pub fn start_playback(&mut self, surface: Arc<dyn PlaybackSurface>) -> bool {
        if self.is_torn_down() || !self.video_status().is_connected() {
            return false;
        }
        self.playback = Some(start_playback(surface, self.config.playback_retry()));
        true
    }

    /// Whether playback has started
    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .map(PlaybackHandle::is_started)
            .unwrap_or(false)
    }

    /// Release everything
    ///
    /// The session ignores further requests afterwards.
    pub fn teardown(&mut self) {
        let mut inner = self.inner.lock();
        if inner.torn_down {
            return;
        }
        inner.torn_down = true;
        self.playback = None;
        inner.video.release();
        inner.audio.release();
        inner.publish();
        tracing::debug!("Capture session torn down");
    }

    /// Camera status
    pub fn video_status(&self) -> CaptureStatus {
        self.status_rx.borrow().video.clone()
    }

    /// Microphone status
    pub fn audio_status(&self) -> CaptureStatus {
        self.status_rx.borrow().audio.clone()
    }

    /// Live tracks held by this session
    pub fn active_tracks(&self, kind: MediaKind) -> usize {
        self.inner.lock().slot(kind).live_tracks()
    }

    /// Whether [`teardown`](Self::teardown) has run
    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }

    fn release(&mut self, kind: MediaKind) {
        let mut inner = self.inner.lock();
        inner.slot_mut(kind).release();
        inner.publish();
    }

    fn request(&mut self, request: MediaRequest) -> CaptureStatus {
        let kind = request.kind();
        let mut inner = self.inner.lock();
        if inner.torn_down {
            tracing::warn!(%kind, "Ignoring capture request on torn down session");
            return inner.slot(kind).status.clone();
        }

        let status = &inner.slot(kind).status;
        if status.is_connected() || status.is_loading() {
            return status.clone();
        }

        let slot = inner.slot_mut(kind);
        if self.backend.is_supported(kind) {
            slot.generation += 1;
            slot.status = CaptureStatus::Requesting;
            slot.request = Some(tokio::spawn(Self::run_request(
                Arc::clone(&self.backend),
                Arc::downgrade(&self.inner),
                request,
                slot.generation,
            )));
        } else {
            tracing::warn!(%kind, "Capture not supported");
            slot.status = CaptureStatus::Failed(CaptureError::Unsupported(kind));
        }

        let status = slot.status.clone();
        inner.publish();
        status
    }

    async fn run_request(
        backend: Arc<dyn CaptureBackend>,
        inner: Weak<Mutex<SessionInner>>,
        request: MediaRequest,
        generation: u64,
    ) {
        let kind = request.kind();
        let result = backend.acquire(request).await;

        let Some(shared) = inner.upgrade() else {
            return;
        };
        let mut inner = shared.lock();
        let slot = inner.slot_mut(kind);
        if slot.generation != generation {
            tracing::debug!(%kind, "Discarding stale capture result");
            return;
        }
        slot.complete(result);
        inner.publish();
    }

    async fn wait_for(&self, kind: MediaKind) -> CaptureStatus {
        let mut rx = self.status_rx.clone();
        let status = match rx.wait_for(|s| !s.status(kind).is_loading()).await {
            Ok(snapshot) => snapshot.status(kind).clone(),
            Err(_) => self.snapshot().status(kind).clone(),
        };
        status
    }
}

impl fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CaptureSession")
            .field("video", &inner.video)
            .field("audio", &inner.audio)
            .field("torn_down", &inner.torn_down)
            .finish()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::{SimulatedCaptureBackend, SimulatedOutcome};
    use std::time::Duration;

    fn session(backend: &Arc<SimulatedCaptureBackend>) -> CaptureSession {
        CaptureSession::new(backend.clone(), CaptureConfig::default())
    }

    #[tokio::test]
    async fn test_camera_connects() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);

        assert_eq!(session.video_status(), CaptureStatus::Idle);
        assert!(session.start_camera().await.is_connected());
        assert!(session.active_tracks(MediaKind::Video) >= 1);
        assert_eq!(backend.live_tracks(MediaKind::Video), 1);
    }

    #[tokio::test]
    async fn test_request_does_not_wait() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Pending);
        let mut session = session(&backend);

        assert_eq!(session.request_camera(), CaptureStatus::Requesting);
        assert!(session.video_status().is_loading());
        assert!(!session.snapshot().is_settled());

        // A second request while one is in flight is a no-op
        assert_eq!(session.request_camera(), CaptureStatus::Requesting);
        tokio::task::yield_now().await;
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_requesting_then_connected() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);
        let mut rx = session.subscribe();

        session.request_camera();
        assert!(rx.borrow_and_update().video.is_loading());

        rx.changed().await.unwrap();
        assert!(rx.borrow().video.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_wait_can_be_retried() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Pending);
        let mut session = session(&backend);

        let waited =
            tokio::time::timeout(Duration::from_millis(50), session.start_camera()).await;
        assert!(waited.is_err());
        assert!(session.video_status().is_loading());

        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Grant);
        assert!(session.retry());
        let snapshot = session.settled().await;
        assert!(snapshot.video.is_connected());
        assert_eq!(backend.requests().len(), 2);
        assert_eq!(backend.live_tracks(MediaKind::Video), 1);
    }

    #[tokio::test]
    async fn test_late_result_after_release_is_stopped() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);

        session.request_microphone();
        session.disable_microphone();
        tokio::task::yield_now().await;

        assert_eq!(session.audio_status(), CaptureStatus::Idle);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);
    }

    #[tokio::test]
    async fn test_camera_request_uses_front_camera_constraints() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);
        session.start_camera().await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        match requests[0] {
            MediaRequest::Video(constraints) => {
                assert_eq!(constraints.facing, FacingMode::User);
                assert_eq!(constraints.ideal, Resolution::new(1280, 720));
                assert_eq!(constraints.minimum, Resolution::new(640, 480));
            }
            MediaRequest::Audio => panic!("expected a video request"),
        }
    }

    #[tokio::test]
    async fn test_microphone_toggle_releases_tracks() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);

        assert!(session.set_microphone(true).await.is_connected());
        assert_eq!(session.active_tracks(MediaKind::Audio), 1);

        assert_eq!(session.set_microphone(false).await, CaptureStatus::Idle);
        assert_eq!(session.active_tracks(MediaKind::Audio), 0);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);
    }

    #[tokio::test]
    async fn test_microphone_is_independent_of_camera() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);

        session.start_camera().await;
        session.enable_microphone().await;
        session.disable_microphone();

        assert!(session.video_status().is_connected());
        assert_eq!(backend.live_tracks(MediaKind::Video), 1);
    }

    #[tokio::test]
    async fn test_denied_is_reported_not_raised() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Deny("NotAllowedError".into()));
        let mut session = session(&backend);

        let status = session.start_camera().await;
        let err = status.error().unwrap();
        assert!(matches!(err, CaptureError::AccessFailed { kind: MediaKind::Video, .. }));
        assert!(status.can_retry());
        assert!(err.user_message().contains("check permissions"));
    }

    #[tokio::test]
    async fn test_empty_stream_is_no_track_error() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Empty);
        let mut session = session(&backend);

        assert_eq!(
            session.start_camera().await,
            CaptureStatus::Failed(CaptureError::NoTrack(MediaKind::Video))
        );
        assert_eq!(session.active_tracks(MediaKind::Video), 0);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Deny("busy".into()));
        let mut session = session(&backend);
        session.start_camera().await;
        assert!(session.video_status().can_retry());

        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Grant);
        assert!(session.retry());
        assert!(session.settled().await.video.is_connected());

        // Nothing left to retry
        assert!(!session.retry());
    }

    #[tokio::test]
    async fn test_teardown_releases_everything() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let mut session = session(&backend);
        session.start_camera().await;
        session.enable_microphone().await;

        session.teardown();
        assert_eq!(backend.live_tracks(MediaKind::Video), 0);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);

        // Requests after teardown are ignored
        assert_eq!(session.start_camera().await, CaptureStatus::Idle);
        assert_eq!(backend.live_tracks(MediaKind::Video), 0);
    }

    #[tokio::test]
    async fn test_teardown_abandons_pending_request() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Pending);
        let mut session = session(&backend);

        session.request_camera();
        session.teardown();
        assert_eq!(session.video_status(), CaptureStatus::Idle);
        assert!(session.snapshot().is_settled());
    }

    #[tokio::test]
    async fn test_drop_releases_everything() {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        {
            let mut session = session(&backend);
            session.start_camera().await;
            session.enable_microphone().await;
        }
        assert_eq!(backend.live_tracks(MediaKind::Video), 0);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);
    }

    #[tokio::test]
    async fn test_unsupported_skips_request() {
        let mut backend = MockCaptureBackend::new();
        backend
            .expect_is_supported()
            .returning(|kind| kind == MediaKind::Video);
        backend.expect_acquire().times(0);

        let mut session = CaptureSession::new(Arc::new(backend), CaptureConfig::default());
        assert_eq!(
            session.request_microphone(),
            CaptureStatus::Failed(CaptureError::Unsupported(MediaKind::Audio))
        );
        assert!(session.snapshot().is_settled());
    }

    #[tokio::test]
    async fn test_backend_error_becomes_status() {
        let mut backend = MockCaptureBackend::new();
        backend.expect_is_supported().returning(|_| true);
        backend.expect_acquire().times(1).returning(|request| {
            Err(CaptureError::AccessFailed {
                kind: request.kind(),
                reason: "NotReadableError".to_string(),
            })
        });

        let mut session = CaptureSession::new(Arc::new(backend), CaptureConfig::default());
        let status = session.start_camera().await;
        assert_eq!(status.error().map(CaptureError::kind), Some(MediaKind::Video));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CaptureError::Unsupported(MediaKind::Audio).to_string(),
            "microphone capture is not supported on this device"
        );
        assert_eq!(
            CaptureError::NoTrack(MediaKind::Video).user_message(),
            "No camera found. Please connect a device and try again."
        );
    }
}
