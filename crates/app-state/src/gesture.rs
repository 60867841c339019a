//! Swipe gestures for the product card stack
//!
//! [`SwipeGesture`] turns a horizontal pointer drag into a left/right
//! decision. [`CardStack`] owns the cards, routes pointer events to the top
//! card only and advances (cyclically) when a decision is committed.
//!
//! A drag is measured from the horizontal center of the viewport:
//!
//! ```text
//! offset = pointer_x - viewport_width / 2
//! ```
//!
//! Releasing with `|offset| > commit_threshold` commits `Right` for a
//! positive offset and `Left` for a negative one. Anything shorter snaps the
//! card back without a decision. Leaving the surface while dragging counts as
//! a release.

use app_core::config::SwipeConfig;
use serde::{Deserialize, Serialize};

// =============================================================================
// Decisions and feedback
// =============================================================================

/// Committed swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Reject
    Left,
    /// Like
    Right,
}

impl SwipeDirection {
    /// Whether this direction counts as a like
    pub fn is_like(&self) -> bool {
        matches!(self, SwipeDirection::Right)
    }
}

/// Overlay shown on the card while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeIndicator {
    /// Heart overlay
    Like,
    /// Cross overlay
    Reject,
}

/// Live visual feedback for a dragged card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragFeedback {
    /// Horizontal translation (px)
    pub offset_x: f32,
    /// Rotation (degrees)
    pub rotation_deg: f32,
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Overlay, if the drag is far enough to show one
    pub indicator: Option<SwipeIndicator>,
    /// Whether the card is being dragged
    pub dragging: bool,
}

impl DragFeedback {
    /// Feedback for a card at rest
    pub fn resting() -> Self {
        Self {
            offset_x: 0.0,
            rotation_deg: 0.0,
            opacity: 1.0,
            indicator: None,
            dragging: false,
        }
    }
}

// =============================================================================
// Gesture interpreter
// =============================================================================

/// Drag interpreter for a single card
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    config: SwipeConfig,
    armed: bool,
    offset: f32,
}

impl SwipeGesture {
    /// Create an idle gesture
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            armed: false,
            offset: 0.0,
        }
    }

    /// Pointer pressed on the card; arms only if the card is active
    pub fn press(&mut self, card_active: bool) -> bool {
        if !card_active {
            return false;
        }
        self.armed = true;
        self.offset = 0.0;
        true
    }

    /// Pointer moved; ignored unless armed
    pub fn drag_to(&mut self, pointer_x: f32, viewport_width: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.offset = pointer_x - viewport_width / 2.0;
        true
    }

    /// Pointer released
    ///
    /// Returns the committed direction, or `None` for a cancelled gesture.
    /// The offset is reset to zero either way.
    pub fn release(&mut self) -> Option<SwipeDirection> {
        if !self.armed {
            return None;
        }
        let decision = self.decide(self.offset);
        self.armed = false;
        self.offset = 0.0;
        decision
    }

    /// Pointer left the surface; same as releasing at the last offset
    pub fn leave(&mut self) -> Option<SwipeDirection> {
        self.release()
    }

    /// Abandon the gesture without a decision
    pub fn reset(&mut self) {
        self.armed = false;
        self.offset = 0.0;
    }

    /// Decision for a final offset
    pub fn decide(&self, offset: f32) -> Option<SwipeDirection> {
        if offset.abs() <= self.config.commit_threshold {
            None
        } else if offset > 0.0 {
            Some(SwipeDirection::Right)
        } else {
            Some(SwipeDirection::Left)
        }
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.armed
    }

    /// Current offset (px)
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Visual feedback for the current offset
    pub fn feedback(&self) -> DragFeedback {
        let indicator = if !self.armed {
            None
        } else if self.offset > self.config.indicator_threshold {
            Some(SwipeIndicator::Like)
        } else if self.offset < -self.config.indicator_threshold {
            Some(SwipeIndicator::Reject)
        } else {
            None
        };

        DragFeedback {
            offset_x: self.offset,
            rotation_deg: self.offset * self.config.rotation_per_px,
            opacity: (1.0 - self.offset.abs() * self.config.fade_per_px).clamp(0.0, 1.0),
            indicator,
            dragging: self.armed,
        }
    }
}

// =============================================================================
// Card stack
// =============================================================================

/// Result of a committed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    /// Decision
    pub direction: SwipeDirection,
    /// Card that was swiped
    pub card_index: usize,
    /// Card now on top
    pub next_index: usize,
    /// Like counter after the swipe
    pub liked_count: u32,
}

/// Stacking layout for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLayout {
    /// Paint order (higher is on top)
    pub z_index: usize,
    /// Vertical offset (px)
    pub translate_y: f32,
    /// Scale factor
    pub scale: f32,
    /// Whether the card is drawn at all
    pub visible: bool,
}

/// Number of cards drawn below the top card
const VISIBLE_DEPTH: usize = 2;
/// Vertical step between stacked cards (px)
const STACK_STEP_PX: f32 = 8.0;
/// Scale step between stacked cards
const STACK_SCALE_STEP: f32 = 0.05;

/// A cyclic stack of swipeable cards
#[derive(Debug, Clone)]
pub struct CardStack<T> {
    cards: Vec<T>,
    current: usize,
    liked: u32,
    gesture: SwipeGesture,
}

impl<T> CardStack<T> {
    /// Create a stack with the first card on top
    pub fn new(cards: Vec<T>, config: SwipeConfig) -> Self {
        Self {
            cards,
            current: 0,
            liked: 0,
            gesture: SwipeGesture::new(config),
        }
    }

    /// All cards in stack order
    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the top card
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Top card
    pub fn current(&self) -> Option<&T> {
        self.cards.get(self.current)
    }

    /// Number of right swipes so far
    pub fn liked_count(&self) -> u32 {
        self.liked
    }

    /// Whether the card at `index` accepts gestures
    pub fn is_active(&self, index: usize) -> bool {
        index == self.current && index < self.cards.len()
    }

    /// Pointer pressed on a card
    pub fn pointer_down(&mut self, index: usize) -> bool {
        let active = self.is_active(index);
        self.gesture.press(active)
    }

    /// Pointer moved over a card
    pub fn pointer_move(&mut self, index: usize, pointer_x: f32, viewport_width: f32) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.gesture.drag_to(pointer_x, viewport_width)
    }

    /// Pointer released over a card
    pub fn pointer_up(&mut self, index: usize) -> Option<SwipeOutcome> {
        if !self.is_active(index) {
            return None;
        }
        let direction = self.gesture.release()?;
        self.commit(direction)
    }

    /// Pointer left a card's surface
    pub fn pointer_leave(&mut self, index: usize) -> Option<SwipeOutcome> {
        if !self.is_active(index) {
            return None;
        }
        let direction = self.gesture.leave()?;
        self.commit(direction)
    }

    /// Commit a decision on the top card without a drag (action buttons)
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        self.gesture.reset();
        self.commit(direction)
    }

    /// Live drag feedback for a card
    pub fn feedback(&self, index: usize) -> DragFeedback {
        if self.is_active(index) {
            self.gesture.feedback()
        } else {
            DragFeedback::resting()
        }
    }

    /// Stacking layout for a card
    ///
    /// Cards already swiped past are hidden; the top card and the two below
    /// it are drawn.
    pub fn layout(&self, index: usize) -> CardLayout {
        let len = self.cards.len();
        let depth = index as isize - self.current as isize;
        let visible = index < len && (0..=VISIBLE_DEPTH as isize).contains(&depth);
        let depth_f = depth as f32;

        CardLayout {
            z_index: if visible { len - depth as usize } else { 0 },
            translate_y: depth_f * STACK_STEP_PX,
            scale: 1.0 - depth_f * STACK_SCALE_STEP,
            visible,
        }
    }

    fn commit(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        if self.cards.is_empty() {
            tracing::debug!(?direction, "Swipe on empty stack ignored");
            return None;
        }

        let card_index = self.current;
        if direction.is_like() {
            self.liked += 1;
        }
        self.current = (self.current + 1) % self.cards.len();

        tracing::debug!(
            ?direction,
            card_index,
            next_index = self.current,
            liked = self.liked,
            "Swipe committed"
        );

        Some(SwipeOutcome {
            direction,
            card_index,
            next_index: self.current,
            liked_count: self.liked,
        })
    }
}
