//! Swipeable product discovery

use super::{ScreenAction, ScreenContext};
use crate::navigation::Route;
use app_core::models::Product;
use app_state::gesture::{CardLayout, CardStack, DragFeedback, SwipeDirection, SwipeOutcome};
use serde::Serialize;

/// One card as drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// Position in the stack
    pub index: usize,
    /// Product on the card
    pub product: Product,
    /// Stack placement
    pub layout: CardLayout,
    /// Drag transform and indicator
    pub feedback: DragFeedback,
    /// Whether the card accepts gestures
    pub active: bool,
}

/// Rendered discover screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverView {
    /// Header title
    pub title: &'static str,
    /// Likes this visit
    pub liked_count: u32,
    /// Like badge, shown once something is liked
    pub like_badge: Option<u32>,
    /// Filter panel visibility
    pub show_filter: bool,
    /// Visible cards, back to front
    pub cards: Vec<CardView>,
    /// "95% Match" for the top card
    pub match_indicator: Option<String>,
}

/// Discover screen
pub struct DiscoverScreen {
    stack: CardStack<Product>,
    show_filter: bool,
}

impl DiscoverScreen {
    /// Mount the screen with the catalog's products
    pub fn mount(ctx: &ScreenContext) -> Self {
        let products = ctx.catalog.products().to_vec();
        tracing::debug!(count = products.len(), "Discover stack loaded");
        Self {
            stack: CardStack::new(products, ctx.config.swipe),
            show_filter: false,
        }
    }

    /// The card stack
    pub fn stack(&self) -> &CardStack<Product> {
        &self.stack
    }

    /// Pointer pressed on a card
    pub fn pointer_down(&mut self, index: usize) -> bool {
        self.stack.pointer_down(index)
    }

    /// Pointer moved over a card
    pub fn pointer_move(&mut self, index: usize, pointer_x: f32, viewport_width: f32) -> bool {
        self.stack.pointer_move(index, pointer_x, viewport_width)
    }

    /// Pointer released over a card
    pub fn pointer_up(&mut self, index: usize) -> Option<SwipeOutcome> {
        self.stack.pointer_up(index)
    }

    /// Pointer left a card
    pub fn pointer_leave(&mut self, index: usize) -> Option<SwipeOutcome> {
        self.stack.pointer_leave(index)
    }

    /// X or heart button
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        self.stack.swipe(direction)
    }

    /// Show or hide the filter panel
    pub fn toggle_filter(&mut self) -> bool {
        self.show_filter = !self.show_filter;
        self.show_filter
    }

    /// Try-on button on a card
    pub fn try_on(&self, index: usize) -> Option<ScreenAction> {
        let product = self.stack.cards().get(index)?;
        Some(ScreenAction::Navigate(Route::TryOn {
            product_id: product.id,
        }))
    }

    /// Try-on button in the action bar
    pub fn try_on_current(&self) -> Option<ScreenAction> {
        self.try_on(self.stack.current_index())
    }

    /// Header back button
    pub fn back(&self) -> ScreenAction {
        ScreenAction::Back
    }

    /// Render the screen
    pub fn view(&self) -> DiscoverView {
        let cards = self
            .stack
            .cards()
            .iter()
            .enumerate()
            .filter_map(|(index, product)| {
                let layout = self.stack.layout(index);
                layout.visible.then(|| CardView {
                    index,
                    product: product.clone(),
                    layout,
                    feedback: self.stack.feedback(index),
                    active: self.stack.is_active(index),
                })
            })
            .rev()
            .collect();

        let liked_count = self.stack.liked_count();
        DiscoverView {
            title: "Discover",
            liked_count,
            like_badge: (liked_count > 0).then_some(liked_count),
            show_filter: self.show_filter,
            cards,
            match_indicator: self
                .stack
                .current()
                .map(|p| format!("{} Match", p.match_label())),
        }
    }
}
