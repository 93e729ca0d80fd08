use std::sync::{Arc, Mutex, PoisonError};

use entrain_node::{ClockDriver, Mode, ModeChangeHook};

/// Clock driver double that keeps every interval it was given
#[derive(Clone, Default)]
pub struct RecordingClock {
    intervals: Arc<Mutex<Vec<f32>>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(&self) -> Vec<f32> {
        self.intervals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<f32> {
        self.intervals().last().copied()
    }
}

impl ClockDriver for RecordingClock {
    fn set_interval(&mut self, interval_ms: f32) {
        self.intervals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(interval_ms);
    }
}

/// Mode hook double that keeps every `(old, new)` pair it was called with
#[derive(Clone, Default)]
pub struct RecordingModeHook {
    transitions: Arc<Mutex<Vec<(Mode, Mode)>>>,
}

impl RecordingModeHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<(Mode, Mode)> {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ModeChangeHook for RecordingModeHook {
    fn on_mode_changed(&mut self, from: Mode, to: Mode) {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((from, to));
    }
}
