//! StyleAI
//!
//! A headless model of a fashion-styling app: a camera home with a voice
//! assistant, a scripted color analysis, a swipeable product stack, virtual
//! try-on, a community feed and a year-end wrapped summary.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! - [`app_core`] - data model, mock catalog, configuration
//! - [`app_platform`] - timers, capture devices, playback, share sheet
//! - [`app_state`] - swipe gestures and the staged analysis flow
//! - [`app_ui`] - routes, screens and the app shell

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;

pub use app_core;
pub use app_platform;
pub use app_state;
pub use app_ui;

pub use app_core::{AppConfig, MockCatalog};
pub use app_ui::{AppShell, Route, ScreenAction, ShellError};
