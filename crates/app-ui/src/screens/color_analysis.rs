//! Scripted color analysis
//!
//! The screen runs a [`StagedFlowController`] whose result is a
//! [`ColorSeason`]. The analysis itself is simulated: unless another
//! producer is supplied, the result is always Autumn Warm.

use super::{ScreenAction, ScreenContext};
use crate::error::{Result, ShellError};
use crate::navigation::Route;
use crate::theme::{luminance, Gradient, Gradients};
use app_core::models::{ColorSeason, SeasonName};
use app_state::staged_flow::{FlowStage, StagedFlowController};
use serde::Serialize;
use tokio::sync::watch;

/// Season reported by the simulated analysis
pub const DEFAULT_SEASON: SeasonName = SeasonName::AutumnWarm;

/// One palette swatch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    /// Hex color
    pub color: String,
    /// Whether labels on this swatch should be dark
    pub light: bool,
}

/// Rendered color analysis screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum ColorAnalysisView {
    /// Face guide shown while positioning
    Positioning {
        /// Headline
        title: &'static str,
        /// Instructions under the headline
        instructions: &'static str,
    },
    /// Spinner
    Analyzing {
        /// Headline
        title: &'static str,
        /// Line under the spinner
        subtitle: &'static str,
    },
    /// Season badge, palette and actions
    #[serde(rename_all = "camelCase")]
    Result {
        /// Season name
        season: SeasonName,
        /// Season description
        description: String,
        /// Heading above the palette
        palette_title: &'static str,
        /// Palette in display order
        palette: Vec<Swatch>,
        /// Badge fill
        badge: Gradient,
        /// Action button labels
        actions: [&'static str; 2],
    },
}

/// Color analysis screen
pub struct ColorAnalysisScreen {
    flow: StagedFlowController<ColorSeason>,
}

impl ColorAnalysisScreen {
    /// Mount the screen and start positioning
    pub fn mount(ctx: &ScreenContext) -> Result<Self> {
        let season = ctx
            .catalog
            .season(DEFAULT_SEASON)
            .cloned()
            .ok_or(ShellError::SeasonUnavailable(DEFAULT_SEASON))?;
        Ok(Self::mount_with(ctx, move || season.clone()))
    }

    /// Mount with a custom result producer
    pub fn mount_with<F>(ctx: &ScreenContext, producer: F) -> Self
    where
        F: Fn() -> ColorSeason + Send + Sync + 'static,
    {
        Self {
            flow: StagedFlowController::start(ctx.config.analysis, producer),
        }
    }

    /// Current stage
    pub fn stage(&self) -> FlowStage<ColorSeason> {
        self.flow.stage()
    }

    /// Stage change notifications
    pub fn subscribe(&self) -> watch::Receiver<FlowStage<ColorSeason>> {
        self.flow.subscribe()
    }

    /// "Start Browsing Clothes", only available once a result is shown
    pub fn start_browsing(&self) -> Option<ScreenAction> {
        self.flow
            .stage()
            .is_terminal()
            .then_some(ScreenAction::Navigate(Route::Discover))
    }

    /// Header back button
    pub fn back(&self) -> ScreenAction {
        ScreenAction::Back
    }

    /// Whether a stage transition is pending
    pub fn is_running(&self) -> bool {
        self.flow.has_pending_transition()
    }

    /// Cancel pending transitions
    pub fn teardown(&mut self) {
        self.flow.teardown();
    }

    /// Render the screen
    pub fn view(&self) -> ColorAnalysisView {
        match self.flow.stage() {
            FlowStage::Positioning => ColorAnalysisView::Positioning {
                title: "Perfect! Hold Still",
                instructions: "Center your face • Good lighting • Stay still",
            },
            FlowStage::Analyzing => ColorAnalysisView::Analyzing {
                title: "Analyzing...",
                subtitle: "Finding your Korean color season",
            },
            FlowStage::Result(season) => ColorAnalysisView::Result {
                season: season.name,
                description: season.description,
                palette_title: "Your Perfect Colors",
                palette: season
                    .colors
                    .into_iter()
                    .map(|color| Swatch {
                        light: luminance(&color).map(|l| l > 0.6).unwrap_or(false),
                        color,
                    })
                    .collect(),
                badge: Gradients::default().season,
                actions: ["View Full Report", "Start Browsing Clothes"],
            },
        }
    }
}
