//! Year-end wrapped slides

use super::{ScreenAction, ScreenContext};
use crate::error::{Result, ShellError};
use crate::navigation::Route;
use crate::theme::Gradient;
use app_core::catalog::CatalogError;
use app_core::models::WrappedSlide;
use app_platform::share::{ShareCapability, ShareOutcome, SharePayload};
use serde::Serialize;

const SHARE_TITLE: &str = "My 2025 Style Wrapped";
const SHARE_TEXT: &str = "Check out my fashion journey this year!";

/// Rendered wrapped screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedView {
    /// Slide content
    pub slide: WrappedSlide,
    /// Resolved slide background
    pub background: Option<Gradient>,
    /// Zero-based slide index
    pub index: usize,
    /// Progress dots, `true` for the current slide
    pub progress: Vec<bool>,
    /// Previous button visibility
    pub show_previous: bool,
    /// Next button visibility
    pub show_next: bool,
    /// Share button visibility
    pub can_share: bool,
}

/// Wrapped screen
pub struct WrappedScreen {
    slides: Vec<WrappedSlide>,
    index: usize,
    share: ShareCapability,
    share_url: String,
}

impl WrappedScreen {
    /// Mount the screen at the first slide
    pub fn mount(ctx: &ScreenContext) -> Result<Self> {
        let slides = ctx.catalog.wrapped_slides().to_vec();
        if slides.is_empty() {
            return Err(ShellError::Catalog(CatalogError::NoSlides));
        }

        Ok(Self {
            slides,
            index: 0,
            share: ctx.share.clone(),
            share_url: format!(
                "{}{}",
                ctx.config.share.base_url.trim_end_matches('/'),
                Route::Wrapped.to_path()
            ),
        })
    }

    /// Advance one slide, stopping at the last
    pub fn next(&mut self) -> usize {
        if self.index + 1 < self.slides.len() {
            self.index += 1;
        }
        self.index
    }

    /// Go back one slide, stopping at the first
    pub fn previous(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Current slide index
    pub fn index(&self) -> usize {
        self.index
    }

    /// What the share sheet receives
    pub fn share_payload(&self) -> SharePayload {
        SharePayload {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: self.share_url.clone(),
        }
    }

    /// Share, a no-op when the platform has no share sheet
    pub async fn share(&self) -> ShareOutcome {
        self.share.share(&self.share_payload()).await
    }

    /// Header back button
    pub fn back(&self) -> ScreenAction {
        ScreenAction::Back
    }

    /// Render the screen
    pub fn view(&self) -> WrappedView {
        let slide = self.slides[self.index].clone();
        WrappedView {
            background: Gradient::from_tokens(slide.background()),
            slide,
            index: self.index,
            progress: (0..self.slides.len()).map(|i| i == self.index).collect(),
            show_previous: self.index > 0,
            show_next: self.index + 1 < self.slides.len(),
            can_share: self.share.is_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing;
    use app_platform::simulated::RecordingShareTarget;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_navigation_is_clamped() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = WrappedScreen::mount(&ctx).unwrap();

        assert_eq!(screen.previous(), 0);
        let view = screen.view();
        assert!(!view.show_previous);
        assert!(view.show_next);
        assert_eq!(view.progress, vec![true, false, false, false, false]);
        assert_eq!(view.slide.kind(), "cover");

        for _ in 0..10 {
            screen.next();
        }
        assert_eq!(screen.index(), 4);
        let view = screen.view();
        assert!(!view.show_next);
        assert!(view.show_previous);
        assert_eq!(view.slide.kind(), "share");

        assert_eq!(screen.previous(), 3);
    }

    #[tokio::test]
    async fn test_backgrounds_resolve() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = WrappedScreen::mount(&ctx).unwrap();
        for _ in 0..5 {
            assert!(screen.view().background.is_some());
            screen.next();
        }
    }

    #[tokio::test]
    async fn test_share_without_capability_is_noop() {
        let (ctx, _backend, _rx) = testing::context();
        let screen = WrappedScreen::mount(&ctx).unwrap();
        assert!(!screen.view().can_share);
        assert_eq!(screen.share().await, ShareOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_share_payload() {
        let (mut ctx, _backend, _rx) = testing::context();
        let target = Arc::new(RecordingShareTarget::new());
        ctx.share = ShareCapability::new(target.clone());
        let screen = WrappedScreen::mount(&ctx).unwrap();

        assert!(screen.view().can_share);
        assert_eq!(screen.share().await, ShareOutcome::Shared);

        let shared = target.shared();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].title, "My 2025 Style Wrapped");
        assert_eq!(shared[0].text, "Check out my fashion journey this year!");
        assert_eq!(shared[0].url, "http://localhost:3000/wrapped");
    }
}
