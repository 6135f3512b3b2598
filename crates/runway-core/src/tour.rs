//! Guided tour - onboarding walkthrough state machine
//!
//! [`TourState`] is the pure machine: a step index in `0..N` plus an open flag.
//! [`TourController`] wraps it for hosts. It reports visibility changes
//! through a callback and rewinds to the first step a short while after the
//! tour closes, so a closing animation still shows the step the user was on.
//! Reopening cancels a pending rewind and starts from the first step.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::config::TourConfig;

/// One page of the walkthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStep {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Icon name understood by the host
    pub icon: String,
}

/// Outcome of a tour action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourTransition {
    /// Index changed while the tour stayed open
    Moved { from: usize, to: usize },
    /// Action had no effect
    Unchanged,
    /// Tour became hidden
    Closed,
    /// Tour became visible
    Opened,
}

/// Position within the tour, derived from the index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourProgress {
    /// 1-based step number
    pub step: usize,
    pub total: usize,
    /// Completed share of the tour, `step / total`
    pub fraction: f64,
}

impl fmt::Display for TourProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.step, self.total)
    }
}

/// Pure tour state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    step_count: usize,
    index: usize,
    open: bool,
}

impl TourState {
    /// Closed tour positioned at the first step
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count: step_count.max(1),
            index: 0,
            open: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.step_count
    }

    pub fn open(&mut self) -> TourTransition {
        if self.open {
            return TourTransition::Unchanged;
        }
        self.open = true;
        TourTransition::Opened
    }

    /// Next step, or close when already on the last one
    pub fn advance(&mut self) -> TourTransition {
        if !self.open {
            return TourTransition::Unchanged;
        }
        if self.is_last() {
            self.open = false;
            return TourTransition::Closed;
        }
        let from = self.index;
        self.index += 1;
        TourTransition::Moved {
            from,
            to: self.index,
        }
    }

    /// Previous step; no-op on the first one
    pub fn retreat(&mut self) -> TourTransition {
        if !self.open || self.is_first() {
            return TourTransition::Unchanged;
        }
        let from = self.index;
        self.index -= 1;
        TourTransition::Moved {
            from,
            to: self.index,
        }
    }

    /// Hide the tour without moving the index
    pub fn close(&mut self) -> TourTransition {
        if !self.open {
            return TourTransition::Unchanged;
        }
        self.open = false;
        TourTransition::Closed
    }

    /// Rewind to the first step
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn progress(&self) -> TourProgress {
        let step = self.index + 1;
        TourProgress {
            step,
            total: self.step_count,
            fraction: step as f64 / self.step_count as f64,
        }
    }
}

type OpenChangeCallback = Box<dyn Fn(bool) + Send + Sync>;

#[derive(Debug)]
struct Shared {
    state: TourState,
    /// Bumped on every schedule/cancel so a woken reset task can tell it is stale
    generation: u64,
}

/// Host-facing tour with visibility callback and deferred rewind
pub struct TourController {
    steps: Vec<TourStep>,
    shared: Arc<Mutex<Shared>>,
    reset_delay: Duration,
    pending_reset: Option<JoinHandle<()>>,
    on_open_change: OpenChangeCallback,
}

impl TourController {
    pub fn new(
        steps: Vec<TourStep>,
        reset_delay: Duration,
        on_open_change: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        let state = TourState::new(steps.len());
        Self {
            steps,
            shared: Arc::new(Mutex::new(Shared {
                state,
                generation: 0,
            })),
            reset_delay,
            pending_reset: None,
            on_open_change: Box::new(on_open_change),
        }
    }

    pub fn from_config(
        config: &TourConfig,
        on_open_change: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        Self::new(config.steps.clone(), config.reset_delay(), on_open_change)
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the underlying state machine
    pub fn state(&self) -> TourState {
        self.lock().state.clone()
    }

    pub fn index(&self) -> usize {
        self.lock().state.index()
    }

    pub fn is_open(&self) -> bool {
        self.lock().state.is_open()
    }

    pub fn progress(&self) -> TourProgress {
        self.lock().state.progress()
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    /// Step currently shown (also while the closing animation plays)
    pub fn current_step(&self) -> Option<&TourStep> {
        self.steps.get(self.index())
    }

    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Show the tour from the first step
    pub fn open(&mut self) -> TourTransition {
        self.cancel_pending_reset();

        let transition = {
            let mut shared = self.lock();
            if !shared.state.is_open() {
                shared.state.reset();
            }
            shared.state.open()
        };

        if transition == TourTransition::Opened {
            tracing::info!(steps = self.steps.len(), "Tour opened");
            (self.on_open_change)(true);
        }
        transition
    }

    pub fn advance(&mut self) -> TourTransition {
        let transition = self.lock().state.advance();
        self.after(transition, "advance")
    }

    pub fn retreat(&mut self) -> TourTransition {
        let transition = self.lock().state.retreat();
        self.after(transition, "retreat")
    }

    /// Close before reaching the end
    pub fn skip(&mut self) -> TourTransition {
        self.close()
    }

    pub fn close(&mut self) -> TourTransition {
        let transition = self.lock().state.close();
        self.after(transition, "close")
    }

    fn after(&mut self, transition: TourTransition, action: &'static str) -> TourTransition {
        match transition {
            TourTransition::Moved { from, to } => {
                tracing::debug!(action, from, to, "Tour step changed");
            }
            TourTransition::Closed => {
                let index = self.index();
                tracing::info!(action, index, "Tour closed");
                (self.on_open_change)(false);
                self.schedule_reset();
            }
            TourTransition::Unchanged | TourTransition::Opened => {}
        }
        transition
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
            self.lock().generation += 1;
            tracing::debug!("Cancelled pending tour reset");
        }
    }

    fn schedule_reset(&mut self) {
        self.cancel_pending_reset();

        let generation = {
            let mut shared = self.lock();
            shared.generation += 1;
            shared.generation
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            // No runtime to defer on; rewind right away
            self.lock().state.reset();
            return;
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.reset_delay;
        self.pending_reset = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let mut shared = shared.lock().unwrap_or_else(|e| e.into_inner());
            if shared.generation == generation && !shared.state.is_open() {
                shared.state.reset();
                tracing::debug!("Tour rewound to first step");
            }
        }));
    }
}

impl Drop for TourController {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }
}

impl fmt::Debug for TourController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourController")
            .field("steps", &self.steps.len())
            .field("state", &self.state())
            .field("reset_delay", &self.reset_delay)
            .finish()
    }
}
