//! Platform services for StyleAI
//!
//! This crate wraps the capabilities the app borrows from the host
//! platform: one-shot timers, camera/microphone capture, video playback and
//! the native share sheet. Each service is a trait with a simulated
//! implementation in [`simulated`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod playback;
pub mod share;
pub mod simulated;
pub mod timer;

pub use capture::{
    CaptureBackend, CaptureError, CaptureSession, CaptureSnapshot, CaptureStatus, FacingMode,
    MediaKind, MediaRequest, MediaStream, MediaTrack, VideoConstraints,
};
pub use playback::{PlaybackError, PlaybackHandle, PlaybackSurface};
pub use share::{ShareCapability, ShareError, ShareOutcome, SharePayload, ShareTarget};
pub use timer::{schedule, ScheduledCallback};
