//! Screen view models
//!
//! Every screen keeps only its own view state and renders a plain `…View`
//! value for the front-end. Screens never navigate directly: user actions
//! return a [`ScreenAction`], and delayed redirects go through the
//! [`Navigator`] channel that the shell drains.

pub mod color_analysis;
pub mod community;
pub mod discover;
pub mod home;
pub mod try_on;
pub mod wrapped;

pub use color_analysis::{ColorAnalysisScreen, ColorAnalysisView};
pub use community::{CommunityScreen, CommunityView, PostView, TagView};
pub use discover::{CardView, DiscoverScreen, DiscoverView};
pub use home::{HomeScreen, HomeView};
pub use try_on::{Size, SizeOption, TryOnScreen, TryOnView};
pub use wrapped::{WrappedScreen, WrappedView};

use crate::navigation::Route;
use app_core::catalog::CatalogProvider;
use app_core::config::AppConfig;
use app_platform::capture::CaptureBackend;
use app_platform::share::ShareCapability;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Navigation requested by a screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "route", rename_all = "lowercase")]
pub enum ScreenAction {
    /// Push a route
    Navigate(Route),
    /// Go back in history
    Back,
}

/// Sender half of the shell's navigation queue
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<ScreenAction>,
}

impl Navigator {
    /// Create a navigator and the receiver the shell drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScreenAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a navigation, returns false if the shell is gone
    pub fn navigate(&self, route: Route) -> bool {
        self.request(ScreenAction::Navigate(route))
    }

    /// Queue a back navigation
    pub fn back(&self) -> bool {
        self.request(ScreenAction::Back)
    }

    /// Queue any action
    pub fn request(&self, action: ScreenAction) -> bool {
        match self.tx.send(action) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(action = ?err.0, "Navigation requested after shell shutdown");
                false
            }
        }
    }
}

/// Services and content shared by every screen
#[derive(Clone)]
pub struct ScreenContext {
    /// Content source
    pub catalog: Arc<dyn CatalogProvider>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Camera and microphone access
    pub capture: Arc<dyn CaptureBackend>,
    /// Optional share sheet
    pub share: ShareCapability,
    /// Delayed navigation
    pub navigator: Navigator,
}

impl fmt::Debug for ScreenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenContext")
            .field("config", &self.config)
            .field("share", &self.share)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use app_core::catalog::MockCatalog;
    use app_platform::simulated::SimulatedCaptureBackend;

    /// Context over the mock catalog and a granting capture backend
    pub fn context() -> (
        ScreenContext,
        Arc<SimulatedCaptureBackend>,
        mpsc::UnboundedReceiver<ScreenAction>,
    ) {
        let backend = Arc::new(SimulatedCaptureBackend::new());
        let (navigator, rx) = Navigator::channel();
        let ctx = ScreenContext {
            catalog: Arc::new(MockCatalog::new()),
            config: Arc::new(AppConfig::default()),
            capture: backend.clone(),
            share: ShareCapability::unavailable(),
            navigator,
        };
        (ctx, backend, rx)
    }
}
