//! Camera home with the voice assistant

use super::{ScreenAction, ScreenContext};
use crate::navigation::Route;
use app_platform::capture::{CaptureSession, CaptureSnapshot, CaptureStatus, MediaKind};
use app_platform::playback::PlaybackSurface;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

const GREETING: &str = "Hi! I'm your AI stylist. Try saying:";
const LISTENING: &str = "I'm listening... 👂";
const SUGGESTION: &str = "\"Analyze my color tone\"";
const HINT: &str = "Say \"Analyze my color tone\" to start";
const STARTING_CAMERA: &str = "Starting camera...";

/// Rendered home screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    /// Camera state
    pub camera: CaptureStatus,
    /// Microphone state
    pub microphone: CaptureStatus,
    /// Placeholder shown while the camera request is pending
    pub camera_loading: Option<&'static str>,
    /// Message shown instead of the camera feed
    pub camera_error: Option<String>,
    /// Whether a retry button is offered
    pub can_retry: bool,
    /// Mic toggle state
    pub mic_on: bool,
    /// Speaker toggle state
    pub speaker_on: bool,
    /// Assistant is listening
    pub listening: bool,
    /// Assistant bubble text
    pub bubble_text: &'static str,
    /// Suggested phrase button, hidden while listening
    pub suggestion: Option<&'static str>,
    /// Hint banner
    pub hint: &'static str,
}

/// Camera home screen
///
/// Owns the capture session for as long as it is mounted. Device requests
/// never block the screen; [`HomeScreen::subscribe`] reports when they land.
pub struct HomeScreen {
    capture: CaptureSession,
    mic_on: bool,
    speaker_on: bool,
}

impl HomeScreen {
    /// Mount the screen and ask for the camera
    pub fn mount(ctx: &ScreenContext) -> Self {
        let mut capture = CaptureSession::new(Arc::clone(&ctx.capture), ctx.config.capture);
        if let Some(err) = capture.request_camera().error() {
            tracing::warn!(error = %err, "Camera unavailable on home screen");
        }

        Self {
            capture,
            mic_on: false,
            speaker_on: true,
        }
    }

    /// Flip the microphone, returns the new toggle state
    ///
    /// Listening starts once the microphone actually connects.
    pub fn toggle_microphone(&mut self) -> bool {
        self.mic_on = !self.mic_on;
        if self.mic_on {
            self.capture.request_microphone();
        } else {
            self.capture.disable_microphone();
        }
        self.mic_on
    }

    /// Flip the speaker, returns the new state
    pub fn toggle_speaker(&mut self) -> bool {
        self.speaker_on = !self.speaker_on;
        self.speaker_on
    }

    /// Re-request failed or stalled devices
    pub fn retry(&mut self) -> bool {
        self.capture.retry()
    }

    /// Wait until no device request is pending
    pub async fn settled(&self) -> CaptureSnapshot {
        self.capture.settled().await
    }

    /// Receiver notified whenever a device changes state
    pub fn subscribe(&self) -> watch::Receiver<CaptureSnapshot> {
        self.capture.subscribe()
    }

    /// Attach the camera feed to a video surface
    pub fn attach_video(&mut self, surface: Arc<dyn PlaybackSurface>) -> bool {
        self.capture.start_playback(surface)
    }

    /// Analyze button or assistant suggestion
    pub fn analyze(&self) -> ScreenAction {
        ScreenAction::Navigate(Route::ColorAnalysis)
    }

    /// Whether the assistant is listening
    pub fn is_listening(&self) -> bool {
        self.mic_on && self.capture.audio_status().is_connected()
    }

    /// The owned capture session
    pub fn capture(&self) -> &CaptureSession {
        &self.capture
    }

    /// Live tracks of one kind
    pub fn active_tracks(&self, kind: MediaKind) -> usize {
        self.capture.active_tracks(kind)
    }

    /// Release the camera and microphone
    pub fn teardown(&mut self) {
        self.capture.teardown();
    }

    /// Render the screen
    pub fn view(&self) -> HomeView {
        let CaptureSnapshot {
            video: camera,
            audio: microphone,
        } = self.capture.snapshot();
        let listening = self.mic_on && microphone.is_connected();

        HomeView {
            camera_loading: camera.is_loading().then_some(STARTING_CAMERA),
            camera_error: camera.error().map(|e| e.user_message()),
            can_retry: camera.can_retry() || microphone.can_retry(),
            camera,
            microphone,
            mic_on: self.mic_on,
            speaker_on: self.speaker_on,
            listening,
            bubble_text: if listening { LISTENING } else { GREETING },
            suggestion: (!listening).then_some(SUGGESTION),
            hint: HINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing;
    use app_platform::simulated::{DeferringSurface, SimulatedOutcome};
    use std::time::Duration;

    async fn mounted(ctx: &ScreenContext) -> HomeScreen {
        let screen = HomeScreen::mount(ctx);
        screen.settled().await;
        screen
    }

    #[tokio::test]
    async fn test_mount_renders_loading_then_connects() {
        let (ctx, backend, _rx) = testing::context();
        let screen = HomeScreen::mount(&ctx);

        let view = screen.view();
        assert_eq!(view.camera, CaptureStatus::Requesting);
        assert_eq!(view.camera_loading, Some("Starting camera..."));
        assert_eq!(view.camera_error, None);
        assert!(!view.can_retry);

        screen.settled().await;
        let view = screen.view();
        assert!(view.camera.is_connected());
        assert_eq!(view.camera_loading, None);
        assert!(!view.mic_on);
        assert!(view.speaker_on);
        assert_eq!(backend.live_tracks(MediaKind::Video), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_camera_keeps_screen_interactive() {
        let (ctx, backend, _rx) = testing::context();
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Pending);
        let mut screen = HomeScreen::mount(&ctx);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(screen.view().camera_loading, Some("Starting camera..."));
        assert!(!screen.toggle_speaker());
        assert_eq!(screen.analyze(), ScreenAction::Navigate(Route::ColorAnalysis));

        screen.teardown();
        assert_eq!(screen.view().camera, CaptureStatus::Idle);
    }

    #[tokio::test]
    async fn test_microphone_toggle_switches_bubble() {
        let (ctx, backend, _rx) = testing::context();
        let mut screen = mounted(&ctx).await;

        assert!(screen.toggle_microphone());
        assert!(!screen.view().listening);
        screen.settled().await;
        let view = screen.view();
        assert!(view.listening);
        assert_eq!(view.bubble_text, "I'm listening... 👂");
        assert_eq!(view.suggestion, None);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 1);

        assert!(!screen.toggle_microphone());
        let view = screen.view();
        assert_eq!(view.microphone, CaptureStatus::Idle);
        assert!(!view.listening);
        assert_eq!(view.bubble_text, "Hi! I'm your AI stylist. Try saying:");
        assert_eq!(view.suggestion, Some("\"Analyze my color tone\""));
        assert_eq!(screen.active_tracks(MediaKind::Audio), 0);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);
    }

    #[tokio::test]
    async fn test_denied_microphone_does_not_listen() {
        let (ctx, backend, _rx) = testing::context();
        backend.set_outcome(MediaKind::Audio, SimulatedOutcome::Deny("blocked".into()));
        let mut screen = mounted(&ctx).await;

        screen.toggle_microphone();
        screen.settled().await;
        let view = screen.view();
        assert!(view.mic_on);
        assert!(!view.listening);
        assert!(view.can_retry);
    }

    #[tokio::test]
    async fn test_speaker_toggle() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = mounted(&ctx).await;
        assert!(!screen.toggle_speaker());
        assert!(screen.toggle_speaker());
    }

    #[tokio::test]
    async fn test_camera_error_and_retry() {
        let (ctx, backend, _rx) = testing::context();
        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Deny("denied".into()));
        let mut screen = mounted(&ctx).await;

        let view = screen.view();
        assert!(view.can_retry);
        assert_eq!(
            view.camera_error.as_deref(),
            Some("Unable to access the camera. Please check permissions and try again.")
        );

        backend.set_outcome(MediaKind::Video, SimulatedOutcome::Grant);
        assert!(screen.retry());
        screen.settled().await;
        let view = screen.view();
        assert!(view.camera.is_connected());
        assert!(!view.can_retry);
    }

    #[tokio::test]
    async fn test_analyze_navigates() {
        let (ctx, _backend, _rx) = testing::context();
        let screen = mounted(&ctx).await;
        assert_eq!(screen.analyze(), ScreenAction::Navigate(Route::ColorAnalysis));
        assert_eq!(screen.view().hint, "Say \"Analyze my color tone\" to start");
    }

    #[tokio::test(start_paused = true)]
    async fn test_video_attaches_after_deferral() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = mounted(&ctx).await;
        let surface = Arc::new(DeferringSurface::new(2));

        assert!(screen.attach_video(surface.clone()));
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(screen.capture().is_playing());
        assert_eq!(surface.attempts(), 3);
    }

    #[tokio::test]
    async fn test_teardown_releases_devices() {
        let (ctx, backend, _rx) = testing::context();
        let mut screen = mounted(&ctx).await;
        screen.toggle_microphone();
        screen.settled().await;

        screen.teardown();
        assert_eq!(backend.live_tracks(MediaKind::Video), 0);
        assert_eq!(backend.live_tracks(MediaKind::Audio), 0);
        assert!(screen.capture().is_torn_down());
    }
}
