//! Run/pause state machine driven by an external toggle

use crate::simulation::states::RunState;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started, // Idle or Settled -> Running; caller must inject the flip
    Paused,  // Running -> Idle
}

#[derive(Debug, Clone)]
pub struct TriggerController {
    state: RunState,
    pending: bool, // toggle received but not yet consumed by a step
}

impl TriggerController {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            pending: false,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Flip between running and not running
    pub fn toggle(&mut self) -> Transition {
        if self.state.is_running() {
            self.state = RunState::Idle;
            Transition::Paused
        } else {
            self.state = RunState::Running;
            Transition::Started
        }
    }

    /// Queue a toggle edge. Two requests before the next step cancel out.
    pub fn request(&mut self) {
        self.pending = !self.pending;
    }

    /// Consume a queued toggle, if any
    pub fn take_pending(&mut self) -> Option<Transition> {
        if std::mem::take(&mut self.pending) {
            Some(self.toggle())
        } else {
            None
        }
    }

    /// The bottle came to rest; stepping stops until the next toggle
    pub fn settle(&mut self) {
        if self.state.is_running() {
            self.state = RunState::Settled;
        }
    }
}

impl Default for TriggerController {
    fn default() -> Self {
        Self::new()
    }
}
