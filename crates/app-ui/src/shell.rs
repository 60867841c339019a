//! Application shell
//!
//! [`AppShell`] owns the history stack and exactly one mounted screen. Every
//! navigation tears the outgoing screen down (cancelling its timers and
//! releasing capture devices) before the incoming screen is mounted.
//!
//! Screens request navigation in two ways: user actions return a
//! [`ScreenAction`] that the caller hands to [`AppShell::dispatch`], and
//! delayed redirects are queued on the [`Navigator`] channel and applied by
//! [`AppShell::pump`].

use crate::error::{Result, ShellError};
use crate::navigation::{NavigationStack, NavigationTab, Route, Router};
use crate::screens::color_analysis::DEFAULT_SEASON;
use crate::screens::{
    ColorAnalysisScreen, ColorAnalysisView, CommunityScreen, CommunityView, DiscoverScreen,
    DiscoverView, HomeScreen, HomeView, Navigator, ScreenAction, ScreenContext, TryOnScreen,
    TryOnView, WrappedScreen, WrappedView,
};
use app_core::catalog::CatalogProvider;
use app_core::config::AppConfig;
use app_platform::capture::CaptureBackend;
use app_platform::share::ShareCapability;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One bottom tab bar item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabBarItem {
    /// Tab
    pub tab: NavigationTab,
    /// Label under the icon
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
    /// Link target
    pub href: String,
    /// Highlighted
    pub active: bool,
}

/// Tab bar for a path
pub fn tab_bar(current_path: &str) -> Vec<TabBarItem> {
    NavigationTab::all()
        .into_iter()
        .map(|tab| TabBarItem {
            tab,
            label: tab.label(),
            icon: tab.icon(),
            href: tab.href(),
            active: tab.is_active(current_path),
        })
        .collect()
}

/// The screen currently mounted
pub enum MountedScreen {
    /// Camera home
    Home(HomeScreen),
    /// Color analysis
    ColorAnalysis(ColorAnalysisScreen),
    /// Discover stack
    Discover(DiscoverScreen),
    /// Try-on
    TryOn(TryOnScreen),
    /// Community feed
    Community(CommunityScreen),
    /// Wrapped slides
    Wrapped(WrappedScreen),
    /// Unknown route
    NotFound,
}

impl MountedScreen {
    fn mount(route: &Route, ctx: &ScreenContext) -> Result<Self> {
        let screen = match route {
            Route::Home => MountedScreen::Home(HomeScreen::mount(ctx)),
            Route::ColorAnalysis => {
                MountedScreen::ColorAnalysis(ColorAnalysisScreen::mount(ctx)?)
            }
            Route::Discover => MountedScreen::Discover(DiscoverScreen::mount(ctx)),
            Route::TryOn { product_id } => {
                MountedScreen::TryOn(TryOnScreen::mount(ctx, *product_id))
            }
            Route::Community => MountedScreen::Community(CommunityScreen::mount(ctx)),
            Route::Wrapped => MountedScreen::Wrapped(WrappedScreen::mount(ctx)?),
            Route::NotFound => MountedScreen::NotFound,
        };
        Ok(screen)
    }

    fn teardown(&mut self) {
        match self {
            MountedScreen::Home(screen) => screen.teardown(),
            MountedScreen::ColorAnalysis(screen) => screen.teardown(),
            MountedScreen::TryOn(screen) => screen.teardown(),
            MountedScreen::Discover(_)
            | MountedScreen::Community(_)
            | MountedScreen::Wrapped(_)
            | MountedScreen::NotFound => {}
        }
    }

    fn view(&self) -> ScreenView {
        match self {
            MountedScreen::Home(screen) => ScreenView::Home(screen.view()),
            MountedScreen::ColorAnalysis(screen) => ScreenView::ColorAnalysis(screen.view()),
            MountedScreen::Discover(screen) => ScreenView::Discover(screen.view()),
            MountedScreen::TryOn(screen) => ScreenView::TryOn(screen.view()),
            MountedScreen::Community(screen) => ScreenView::Community(screen.view()),
            MountedScreen::Wrapped(screen) => ScreenView::Wrapped(screen.view()),
            MountedScreen::NotFound => ScreenView::NotFound {
                message: "This page could not be found.",
            },
        }
    }
}

/// Rendered screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "view", rename_all = "camelCase")]
pub enum ScreenView {
    /// Camera home
    Home(HomeView),
    /// Color analysis
    ColorAnalysis(ColorAnalysisView),
    /// Discover stack
    Discover(DiscoverView),
    /// Try-on
    TryOn(TryOnView),
    /// Community feed
    Community(CommunityView),
    /// Wrapped slides
    Wrapped(WrappedView),
    /// Unknown route
    NotFound {
        /// Message
        message: &'static str,
    },
}

/// Rendered shell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    /// Current path
    pub path: String,
    /// Header title
    pub title: &'static str,
    /// Mounted screen
    pub screen: ScreenView,
    /// Bottom tab bar
    pub tabs: Vec<TabBarItem>,
}

/// Navigation shell and screen lifecycle owner
pub struct AppShell {
    ctx: ScreenContext,
    router: Router,
    history: NavigationStack,
    screen: MountedScreen,
    requests: mpsc::UnboundedReceiver<ScreenAction>,
}

impl AppShell {
    /// Validate the catalog and mount the home screen
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        catalog: Arc<dyn CatalogProvider>,
        config: Arc<AppConfig>,
        capture: Arc<dyn CaptureBackend>,
        share: ShareCapability,
    ) -> Result<Self> {
        app_core::catalog::validate(catalog.as_ref())?;
        if catalog.season(DEFAULT_SEASON).is_none() {
            return Err(ShellError::SeasonUnavailable(DEFAULT_SEASON));
        }

        let (navigator, requests) = Navigator::channel();
        let ctx = ScreenContext {
            catalog,
            config,
            capture,
            share,
            navigator,
        };

        let history = NavigationStack::new(Route::Home);
        let screen = MountedScreen::mount(history.current(), &ctx)?;
        tracing::info!(path = "/", "Shell started");

        Ok(Self {
            ctx,
            router: Router::new(),
            history,
            screen,
            requests,
        })
    }

    /// Push a route and mount its screen
    ///
    /// If the screen fails to mount the route is popped again and the
    /// previous screen is mounted in its place.
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        self.history.push(route);
        if let Err(err) = self.remount() {
            self.history.pop();
            self.remount()?;
            return Err(err);
        }
        Ok(())
    }

    /// Resolve a path and navigate to it
    pub fn open_path(&mut self, path: &str) -> Result<()> {
        let route = self.router.match_path(path);
        self.navigate(route)
    }

    /// Go back, returns false at the root
    pub fn back(&mut self) -> Result<bool> {
        let leaving = self.history.current().clone();
        if !self.history.pop() {
            return Ok(false);
        }
        if let Err(err) = self.remount() {
            self.history.push(leaving);
            self.remount()?;
            return Err(err);
        }
        Ok(true)
    }

    /// Apply a screen action
    pub fn dispatch(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::Navigate(route) => self.navigate(route),
            ScreenAction::Back => self.back().map(|_| ()),
        }
    }

    /// Apply queued navigation requests, returns how many were applied
    ///
    /// Requests queued by a screen that has since been left are discarded
    /// on navigation and never reach this point.
    pub fn pump(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(action) = self.requests.try_recv() {
            self.dispatch(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Tear down the mounted screen
    pub fn shutdown(&mut self) {
        self.screen.teardown();
        self.screen = MountedScreen::NotFound;
    }

    /// Current route
    pub fn current_route(&self) -> &Route {
        self.history.current()
    }

    /// Current path
    pub fn current_path(&self) -> String {
        self.current_route().to_path()
    }

    /// History depth
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Mounted screen
    pub fn screen(&self) -> &MountedScreen {
        &self.screen
    }

    /// Mounted screen, mutably
    pub fn screen_mut(&mut self) -> &mut MountedScreen {
        &mut self.screen
    }

    /// Navigator for queueing requests from outside a screen
    pub fn navigator(&self) -> Navigator {
        self.ctx.navigator.clone()
    }

    /// Render the shell
    pub fn render(&self) -> ShellView {
        let path = self.current_path();
        ShellView {
            title: self.current_route().title(),
            screen: self.screen.view(),
            tabs: tab_bar(&path),
            path,
        }
    }

    fn remount(&mut self) -> Result<()> {
        let route = self.history.current().clone();
        self.screen.teardown();
        self.screen = MountedScreen::NotFound;

        let mut stale = 0;
        while self.requests.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            tracing::debug!(stale, "Discarded navigation requests from the previous screen");
        }

        self.screen = MountedScreen::mount(&route, &self.ctx)?;
        tracing::info!(path = %route.to_path(), "Navigated");
        Ok(())
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.screen.teardown();
    }
}
