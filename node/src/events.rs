use std::{mem, vec::IntoIter};

use entrain_shared::{Mode, ModeTransition};

use crate::NodeError;

/// One clock beat as seen by the node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beat {
    /// Beats counted since activation, starting at 1
    pub beat: u64,
    pub mode: Mode,
    pub integrated_period: Option<f32>,
}

/// Everything that happened inside a node since the events were last taken.
pub struct Events {
    mode_changes: Vec<ModeTransition>,
    intervals: Vec<f32>,
    beats: Vec<Beat>,
    errors: Vec<NodeError>,

    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            mode_changes: Vec::new(),
            intervals: Vec::new(),
            beats: Vec::new(),
            errors: Vec::new(),

            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_mode_change(&mut self, transition: ModeTransition) {
        self.mode_changes.push(transition);
        self.empty = false;
    }

    pub(crate) fn push_interval(&mut self, interval_ms: f32) {
        self.intervals.push(interval_ms);
        self.empty = false;
    }

    pub(crate) fn push_beat(&mut self, beat: Beat) {
        self.beats.push(beat);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: NodeError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn take(&mut self) -> Self {
        mem::take(self)
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// ModeChangeEvent
pub struct ModeChangeEvent;
impl Event for ModeChangeEvent {
    type Iter = IntoIter<ModeTransition>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.mode_changes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.mode_changes.is_empty()
    }
}

// IntervalEvent
pub struct IntervalEvent;
impl Event for IntervalEvent {
    type Iter = IntoIter<f32>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.intervals);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.intervals.is_empty()
    }
}

// BeatEvent
pub struct BeatEvent;
impl Event for BeatEvent {
    type Iter = IntoIter<Beat>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.beats);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.beats.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<NodeError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}
