//! Virtual try-on
//!
//! Confirming "Add to Cart" shows a confirmation and then redirects to the
//! discover stack after a delay. The redirect is a scheduled callback owned
//! by the screen, so leaving the screen first cancels it.

use super::{Navigator, ScreenAction, ScreenContext};
use crate::navigation::Route;
use crate::theme::{Gradient, Gradients};
use app_core::models::{Product, ProductId};
use app_platform::timer::{schedule, ScheduledCallback};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Garment sizes offered by the size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Size {
    /// Extra small
    XS,
    /// Small
    S,
    /// Medium
    #[default]
    M,
    /// Large
    L,
    /// Extra large
    XL,
}

impl Size {
    /// Sizes in selector order
    pub fn all() -> [Size; 5] {
        [Size::XS, Size::S, Size::M, Size::L, Size::XL]
    }

    /// Button label
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    /// Size
    pub size: Size,
    /// Whether it is the current selection
    pub selected: bool,
}

/// Rendered try-on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TryOnView {
    /// The path named a product the catalog doesn't have
    #[serde(rename_all = "camelCase")]
    NotFound {
        /// Requested id
        product_id: ProductId,
        /// Message in place of the product
        message: String,
    },
    /// Product with the AR overlay and cart controls
    #[serde(rename_all = "camelCase")]
    Product {
        /// Header title
        title: &'static str,
        /// Product being tried on
        product: Product,
        /// "Zara • $89"
        subtitle: String,
        /// "95% Match"
        match_badge: String,
        /// AR garment overlay label, `None` when the overlay is hidden
        overlay: Option<String>,
        /// Size selector
        sizes: Vec<SizeOption>,
        /// Cart button text
        cart_label: String,
        /// Whether the cart button accepts input
        cart_enabled: bool,
        /// Cart button fill
        cart_fill: Gradient,
    },
}

/// Try-on screen for one product
pub struct TryOnScreen {
    product_id: ProductId,
    product: Option<Product>,
    size: Size,
    show_overlay: bool,
    confirmed: bool,
    redirect: Option<ScheduledCallback>,
    redirect_delay: Duration,
    navigator: Navigator,
}

impl TryOnScreen {
    /// Mount the screen for the product in the route
    pub fn mount(ctx: &ScreenContext, product_id: ProductId) -> Self {
        let product = ctx.catalog.product(product_id).cloned();
        if product.is_none() {
            tracing::warn!(product_id, "Try-on requested for unknown product");
        }

        Self {
            product_id,
            product,
            size: Size::default(),
            show_overlay: true,
            confirmed: false,
            redirect: None,
            redirect_delay: ctx.config.try_on.redirect(),
            navigator: ctx.navigator.clone(),
        }
    }

    /// The product, if the catalog has it
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Select a size
    pub fn select_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Selected size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Show or hide the AR overlay
    pub fn toggle_overlay(&mut self) -> bool {
        self.show_overlay = !self.show_overlay;
        self.show_overlay
    }

    /// Confirm the cart and arm the redirect
    ///
    /// Returns false when already confirmed or there is no product.
    pub fn add_to_cart(&mut self) -> bool {
        if self.confirmed || self.product.is_none() {
            return false;
        }
        self.confirmed = true;
        tracing::info!(product_id = self.product_id, size = %self.size, "Added to cart");

        let navigator = self.navigator.clone();
        self.redirect = Some(schedule(self.redirect_delay, move || {
            navigator.navigate(Route::Discover);
        }));
        true
    }

    /// Whether the cart was confirmed
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Whether the redirect is still waiting
    pub fn has_pending_redirect(&self) -> bool {
        self.redirect
            .as_ref()
            .map(ScheduledCallback::is_pending)
            .unwrap_or(false)
    }

    /// Header back button
    pub fn back(&self) -> ScreenAction {
        ScreenAction::Back
    }

    /// Cancel the redirect
    pub fn teardown(&mut self) {
        if let Some(redirect) = self.redirect.take() {
            redirect.cancel();
        }
    }

    /// Render the screen
    pub fn view(&self) -> TryOnView {
        let Some(product) = &self.product else {
            return TryOnView::NotFound {
                product_id: self.product_id,
                message: format!("Product {} is no longer available.", self.product_id),
            };
        };

        TryOnView::Product {
            title: "Virtual Try-On",
            subtitle: format!("{} • {}", product.brand, product.price),
            match_badge: format!("{} Match", product.match_label()),
            overlay: self.show_overlay.then(|| product.title.clone()),
            sizes: Size::all()
                .into_iter()
                .map(|size| SizeOption {
                    size,
                    selected: size == self.size,
                })
                .collect(),
            cart_label: if self.confirmed {
                "Added to Cart!".to_string()
            } else {
                format!("Add to Cart - {}", product.price)
            },
            cart_enabled: !self.confirmed,
            cart_fill: Gradients::default().confirm,
            product: product.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing;

    fn cart_label(view: &TryOnView) -> &str {
        match view {
            TryOnView::Product { cart_label, .. } => cart_label,
            TryOnView::NotFound { .. } => panic!("expected a product"),
        }
    }

    #[tokio::test]
    async fn test_defaults() {
        let (ctx, _backend, _rx) = testing::context();
        let screen = TryOnScreen::mount(&ctx, 1);

        match screen.view() {
            TryOnView::Product {
                subtitle,
                match_badge,
                overlay,
                sizes,
                cart_enabled,
                ..
            } => {
                assert_eq!(subtitle, "Zara • $89");
                assert_eq!(match_badge, "95% Match");
                assert_eq!(overlay.as_deref(), Some("Autumn Knit Sweater"));
                let selected: Vec<_> = sizes.iter().filter(|s| s.selected).map(|s| s.size).collect();
                assert_eq!(selected, vec![Size::M]);
                assert_eq!(sizes.len(), 5);
                assert!(cart_enabled);
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(cart_label(&screen.view()), "Add to Cart - $89");
    }

    #[tokio::test]
    async fn test_size_and_overlay() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = TryOnScreen::mount(&ctx, 2);

        screen.select_size(Size::XL);
        assert_eq!(screen.size(), Size::XL);
        assert!(!screen.toggle_overlay());
        assert!(matches!(screen.view(), TryOnView::Product { overlay: None, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_redirects_after_delay() {
        let (ctx, _backend, mut rx) = testing::context();
        let mut screen = TryOnScreen::mount(&ctx, 1);

        assert!(screen.add_to_cart());
        assert_eq!(cart_label(&screen.view()), "Added to Cart!");
        assert!(screen.has_pending_redirect());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), ScreenAction::Navigate(Route::Discover));
        assert!(!screen.has_pending_redirect());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_confirm_is_ignored() {
        let (ctx, _backend, mut rx) = testing::context();
        let mut screen = TryOnScreen::mount(&ctx, 1);

        assert!(screen.add_to_cart());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!screen.add_to_cart());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_redirect() {
        let (ctx, _backend, mut rx) = testing::context();
        let mut screen = TryOnScreen::mount(&ctx, 1);

        screen.add_to_cart();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        screen.teardown();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let (ctx, _backend, _rx) = testing::context();
        let mut screen = TryOnScreen::mount(&ctx, 42);

        assert!(screen.product().is_none());
        assert!(!screen.add_to_cart());
        assert!(matches!(
            screen.view(),
            TryOnView::NotFound { product_id: 42, .. }
        ));
    }

    #[test]
    fn test_size_labels() {
        let labels: Vec<_> = Size::all().iter().map(Size::to_string).collect();
        assert_eq!(labels, vec!["XS", "S", "M", "L", "XL"]);
    }
}
