//! Navigation for StyleAI
//!
//! This module provides:
//! - Route definitions with path generation
//! - A pattern router for resolving paths
//! - The bottom tab bar items
//! - A history stack with push/back

use app_core::models::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Route Parameters
// =============================================================================

/// Parameters extracted from a path
pub type RouteParams = HashMap<String, String>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All routes in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Camera home with the voice assistant
    #[default]
    Home,
    /// Swipeable product discovery
    Discover,
    /// Community feed
    Community,
    /// Year-end wrapped slides
    Wrapped,
    /// Staged color analysis
    ColorAnalysis,
    /// Virtual try-on for one product
    TryOn {
        /// Product being tried on
        #[serde(rename = "productId")]
        product_id: ProductId,
    },
    /// Unknown path
    NotFound,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Discover => "/swipe".to_string(),
            Route::Community => "/community".to_string(),
            Route::Wrapped => "/wrapped".to_string(),
            Route::ColorAnalysis => "/color-analysis".to_string(),
            Route::TryOn { product_id } => format!("/try-on/{}", product_id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Header title shown for this route
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "StyleAI",
            Route::Discover => "Discover",
            Route::Community => "Community",
            Route::Wrapped => "Your 2025 Wrapped",
            Route::ColorAnalysis => "Color Analysis",
            Route::TryOn { .. } => "Virtual Try-On",
            Route::NotFound => "Page Not Found",
        }
    }
}

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTab {
    /// Camera home
    #[default]
    Camera,
    /// Discover stack
    Swipe,
    /// Community feed
    Community,
    /// Wrapped slides
    Wrapped,
}

impl NavigationTab {
    /// Get the root route for this tab
    pub fn root_route(&self) -> Route {
        match self {
            NavigationTab::Camera => Route::Home,
            NavigationTab::Swipe => Route::Discover,
            NavigationTab::Community => Route::Community,
            NavigationTab::Wrapped => Route::Wrapped,
        }
    }

    /// Link target of the tab
    pub fn href(&self) -> String {
        self.root_route().to_path()
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            NavigationTab::Camera => "home",
            NavigationTab::Swipe => "sparkles",
            NavigationTab::Community => "users",
            NavigationTab::Wrapped => "bar-chart-3",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            NavigationTab::Camera => "Camera",
            NavigationTab::Swipe => "Swipe",
            NavigationTab::Community => "Community",
            NavigationTab::Wrapped => "Wrapped",
        }
    }

    /// A tab is active only on its exact path
    pub fn is_active(&self, current_path: &str) -> bool {
        self.href() == current_path
    }

    /// Get all tabs in order
    pub fn all() -> [NavigationTab; 4] {
        [
            NavigationTab::Camera,
            NavigationTab::Swipe,
            NavigationTab::Community,
            NavigationTab::Wrapped,
        ]
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Browser-style history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Root entry, never popped
    root: StackEntry,
    /// Entries pushed above the root (bottom to top)
    entries: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            entries: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.entries.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        match self.entries.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.entries.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.entries.len() + 1
    }

    /// Reset to a new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.entries.clear();
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    /// Pattern segments
    segments: Vec<PatternSegment>,
    /// Route builder
    builder: fn(RouteParams) -> Option<Route>,
}

/// Segment type in a pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// URL Router for parsing paths to routes
pub struct Router {
    /// Route patterns
    patterns: Vec<RoutePattern>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self {
            patterns: Vec::new(),
        };

        router.add_route("/", |_| Some(Route::Home));
        router.add_route("/swipe", |_| Some(Route::Discover));
        router.add_route("/community", |_| Some(Route::Community));
        router.add_route("/wrapped", |_| Some(Route::Wrapped));
        router.add_route("/color-analysis", |_| Some(Route::ColorAnalysis));
        router.add_route("/try-on/:productId", |params| {
            Some(Route::TryOn {
                product_id: params.get("productId")?.parse().ok()?,
            })
        });

        router
    }

    fn add_route(&mut self, pattern: &str, builder: fn(RouteParams) -> Option<Route>) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(param) = s.strip_prefix(':') {
                    PatternSegment::Param(param.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        self.patterns.push(RoutePattern { segments, builder });
    }

    /// Match a path to a route
    ///
    /// Query strings and fragments are ignored.
    pub fn match_path(&self, path: &str) -> Route {
        let pathname = path.split(['?', '#']).next().unwrap_or_default();
        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        for pattern in &self.patterns {
            if let Some(params) = Self::match_pattern(&pattern.segments, &path_segments) {
                if let Some(route) = (pattern.builder)(params) {
                    return route;
                }
            }
        }

        Route::NotFound
    }

    /// Match a pattern against path segments
    fn match_pattern(pattern: &[PatternSegment], path: &[&str]) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, actual) in pattern.iter().zip(path.iter()) {
            match segment {
                PatternSegment::Literal(expected) => {
                    if expected != *actual {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.insert(
                        name.clone(),
                        urlencoding::decode(actual).ok()?.into_owned(),
                    );
                }
            }
        }

        Some(params)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_path() {
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::Discover.to_path(), "/swipe");
        assert_eq!(Route::ColorAnalysis.to_path(), "/color-analysis");
        assert_eq!(Route::TryOn { product_id: 2 }.to_path(), "/try-on/2");
    }

    #[test]
    fn test_router_matches_every_route() {
        let router = Router::new();
        for route in [
            Route::Home,
            Route::Discover,
            Route::Community,
            Route::Wrapped,
            Route::ColorAnalysis,
            Route::TryOn { product_id: 3 },
        ] {
            assert_eq!(router.match_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_router_ignores_query_and_trailing_slash() {
        let router = Router::new();
        assert_eq!(router.match_path("/swipe?filter=warm"), Route::Discover);
        assert_eq!(router.match_path("/community/"), Route::Community);
        assert_eq!(router.match_path(""), Route::Home);
    }

    #[test]
    fn test_router_not_found() {
        let router = Router::new();
        assert_eq!(router.match_path("/nonexistent/path"), Route::NotFound);
        assert_eq!(router.match_path("/try-on"), Route::NotFound);
        assert_eq!(router.match_path("/try-on/sweater"), Route::NotFound);
        assert_eq!(router.match_path("/try-on/1/extra"), Route::NotFound);
    }

    #[test]
    fn test_router_decodes_params() {
        let router = Router::new();
        assert_eq!(
            router.match_path("/try-on/%32"),
            Route::TryOn { product_id: 2 }
        );
    }

    #[test]
    fn test_tab_active_only_on_exact_path() {
        assert!(NavigationTab::Swipe.is_active("/swipe"));
        assert!(!NavigationTab::Swipe.is_active("/try-on/1"));
        assert!(NavigationTab::Camera.is_active("/"));
        assert!(!NavigationTab::Camera.is_active("/color-analysis"));

        let active: Vec<_> = NavigationTab::all()
            .into_iter()
            .filter(|tab| tab.is_active("/wrapped"))
            .collect();
        assert_eq!(active, vec![NavigationTab::Wrapped]);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = NavigationTab::all().iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Camera", "Swipe", "Community", "Wrapped"]);
        assert_eq!(NavigationTab::Camera.href(), "/");
    }

    #[test]
    fn test_tab_icons() {
        let icons: Vec<_> = NavigationTab::all().iter().map(|t| t.icon()).collect();
        assert_eq!(icons, vec!["home", "sparkles", "users", "bar-chart-3"]);
    }

    #[test]
    fn test_navigation_stack_push_pop() {
        let mut stack = NavigationStack::new(Route::Home);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_go_back());

        stack.push(Route::ColorAnalysis);
        assert_eq!(stack.depth(), 2);
        assert!(stack.can_go_back());
        assert_eq!(*stack.current(), Route::ColorAnalysis);

        assert!(stack.pop());
        assert_eq!(*stack.current(), Route::Home);

        // Can't pop past root
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_navigation_stack_replace_and_reset() {
        let mut stack = NavigationStack::default();
        stack.replace(Route::Discover);
        assert_eq!(*stack.current(), Route::Discover);
        assert_eq!(stack.depth(), 1);

        stack.push(Route::TryOn { product_id: 1 });
        let key = stack.current_entry().key.clone();
        stack.replace(Route::Community);
        assert_ne!(stack.current_entry().key, key);
        assert_eq!(stack.depth(), 2);

        stack.reset(Route::Wrapped);
        assert_eq!(*stack.current(), Route::Wrapped);
        assert!(!stack.can_go_back());
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::TryOn { product_id: 2 };
        let json = serde_json::to_string(&route).unwrap();
        assert!(json.contains("productId"));
        let parsed: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, parsed);
    }

    #[test]
    fn test_route_title() {
        assert_eq!(Route::Discover.title(), "Discover");
        assert_eq!(Route::TryOn { product_id: 1 }.title(), "Virtual Try-On");
    }
}
