//! User interface for StyleAI
//!
//! This crate provides the headless UI layer: routes and history, the tab
//! bar, color tokens, one view model per screen, and the [`AppShell`] that
//! mounts screens and tears them down on navigation.
//!
//! # Modules
//!
//! - [`navigation`] - Routes, router, tabs and history
//! - [`theme`] - Brand colors and gradient tokens
//! - [`screens`] - Screen view models
//! - [`shell`] - Screen lifecycle and tab bar
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{NavigationTab, Route, Router};
//!
//! let router = Router::new();
//! assert_eq!(router.match_path("/try-on/2"), Route::TryOn { product_id: 2 });
//! assert!(NavigationTab::Swipe.is_active("/swipe"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod navigation;
pub mod screens;
pub mod shell;
pub mod theme;

pub use error::{Result, ShellError};

pub use navigation::{NavigationStack, NavigationTab, Route, RouteParams, Router, StackEntry};

pub use screens::{Navigator, ScreenAction, ScreenContext};

pub use shell::{tab_bar, AppShell, MountedScreen, ScreenView, ShellView, TabBarItem};

pub use theme::{Gradient, GradientStop, Gradients};
