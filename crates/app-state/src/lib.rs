//! Interaction state for StyleAI
//!
//! This crate holds the state machines behind the screens: the swipe
//! gesture interpreter with its card stack, and the timer-driven staged flow
//! used by color analysis.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gesture;
pub mod staged_flow;

pub use gesture::{
    CardLayout, CardStack, DragFeedback, SwipeDirection, SwipeGesture, SwipeIndicator,
    SwipeOutcome,
};
pub use staged_flow::{FlowStage, ResultProducer, StagedFlowController};
