//! Timer-driven staged flow
//!
//! [`StagedFlowController`] drives the linear sequence
//! `Positioning -> Analyzing -> Result` used to simulate a multi-phase
//! process. Entering a stage schedules the transition out of it; tearing the
//! controller down cancels whatever is pending, and a callback that loses the
//! race against teardown finds the controller disposed and does nothing.
//!
//! The payload of the terminal stage comes from an injected producer, so a
//! real analyzer can replace the fixed result without touching the
//! controller.

use app_core::config::AnalysisTimings;
use app_platform::timer::{schedule, ScheduledCallback};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

/// Stages of the flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "result", rename_all = "lowercase")]
pub enum FlowStage<R> {
    /// Waiting for the subject to hold still
    Positioning,
    /// Processing
    Analyzing,
    /// Finished with a result
    Result(R),
}

impl<R> FlowStage<R> {
    /// Stage name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FlowStage::Positioning => "positioning",
            FlowStage::Analyzing => "analyzing",
            FlowStage::Result(_) => "result",
        }
    }

    /// Whether the flow has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStage::Result(_))
    }

    /// The result, once finished
    pub fn result(&self) -> Option<&R> {
        match self {
            FlowStage::Result(result) => Some(result),
            _ => None,
        }
    }
}

/// Produces the payload of the terminal stage
pub type ResultProducer<R> = Arc<dyn Fn() -> R + Send + Sync>;

struct FlowInner<R> {
    stage_tx: watch::Sender<FlowStage<R>>,
    pending: Option<ScheduledCallback>,
    disposed: bool,
    timings: AnalysisTimings,
    producer: ResultProducer<R>,
}

/// Linear three-stage state machine driven by timers
pub struct StagedFlowController<R> {
    inner: Arc<Mutex<FlowInner<R>>>,
    stage_rx: watch::Receiver<FlowStage<R>>,
}

impl<R> StagedFlowController<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Enter `Positioning` and arm the first transition
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(timings: AnalysisTimings, producer: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        let (stage_tx, stage_rx) = watch::channel(FlowStage::Positioning);
        let inner = Arc::new(Mutex::new(FlowInner {
            stage_tx,
            pending: None,
            disposed: false,
            timings,
            producer: Arc::new(producer),
        }));

        {
            let mut guard = inner.lock();
            guard.pending = Some(Self::arm(&inner, timings.positioning()));
        }
        tracing::debug!(stage = "positioning", "Staged flow started");

        Self { inner, stage_rx }
    }

    /// Snapshot of the current stage
    pub fn stage(&self) -> FlowStage<R> {
        self.stage_rx.borrow().clone()
    }

    /// Receiver notified on every stage change
    pub fn subscribe(&self) -> watch::Receiver<FlowStage<R>> {
        self.stage_rx.clone()
    }

    /// Whether a transition is waiting on a timer
    pub fn has_pending_transition(&self) -> bool {
        self.inner
            .lock()
            .pending
            .as_ref()
            .map(ScheduledCallback::is_pending)
            .unwrap_or(false)
    }

    /// Cancel any pending transition and dispose the controller
    pub fn teardown(&self) {
        let mut inner = self.inner.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        if inner.pending.take().is_some() {
            tracing::debug!(stage = self.stage_rx.borrow().name(), "Cancelled pending transition");
        }
    }

    /// Whether [`teardown`](Self::teardown) has run
    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    fn arm(inner: &Arc<Mutex<FlowInner<R>>>, delay: std::time::Duration) -> ScheduledCallback {
        let weak = Arc::downgrade(inner);
        schedule(delay, move || Self::advance(&weak))
    }

    fn advance(weak: &Weak<Mutex<FlowInner<R>>>) {
        let Some(inner_arc) = weak.upgrade() else {
            return;
        };
        let mut inner = inner_arc.lock();
        if inner.disposed {
            return;
        }

        let next = match &*inner.stage_tx.borrow() {
            FlowStage::Positioning => FlowStage::Analyzing,
            FlowStage::Analyzing => FlowStage::Result((inner.producer)()),
            FlowStage::Result(_) => return,
        };

        tracing::debug!(stage = next.name(), "Staged flow transition");
        let terminal = next.is_terminal();
        inner.stage_tx.send_replace(next);

        inner.pending = if terminal {
            None
        } else {
            let delay = inner.timings.analyzing();
            Some(Self::arm(&inner_arc, delay))
        };
    }
}

impl<R> Drop for StagedFlowController<R> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        inner.disposed = true;
        inner.pending = None;
    }
}
