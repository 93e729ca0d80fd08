use std::fmt;

/// Coordination mode of a node, derived from its own deviation and the last
/// deviation heard from a peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Both irregular.
    Disjoint,
    /// Local regular, peer irregular.
    Solo,
    /// Local irregular, peer regular.
    Baseline,
    /// Both regular.
    Unity,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Disjoint, Mode::Solo, Mode::Baseline, Mode::Unity];

    /// The transition table. A deviation at or above `threshold` is
    /// irregular.
    ///
    /// | local ≥ T | peer ≥ T | mode     |
    /// |-----------|----------|----------|
    /// | yes       | yes      | Disjoint |
    /// | yes       | no       | Baseline |
    /// | no        | yes      | Solo     |
    /// | no        | no       | Unity    |
    pub fn from_deviations(local: f32, peer: f32, threshold: f32) -> Self {
        match (local >= threshold, peer >= threshold) {
            (true, true) => Mode::Disjoint,
            (true, false) => Mode::Baseline,
            (false, true) => Mode::Solo,
            (false, false) => Mode::Unity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Disjoint => "DISJOINT",
            Mode::Solo => "SOLO",
            Mode::Baseline => "BASELINE",
            Mode::Unity => "UNITY",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
}

/// Owns the current [`Mode`]. Nothing else writes it.
#[derive(Clone, Debug)]
pub struct ModeStateMachine {
    mode: Mode,
    threshold: f32,
}

impl ModeStateMachine {
    pub fn new(initial: Mode, threshold: f32) -> Self {
        Self {
            mode: initial,
            threshold,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Re-derives the mode from a consistent `(local, peer)` deviation pair.
    ///
    /// On an actual change `on_change(old, new)` runs before the mode is
    /// updated, and the transition is returned. Re-evaluating into the same
    /// mode does nothing.
    pub fn evaluate<F: FnOnce(Mode, Mode)>(
        &mut self,
        local: f32,
        peer: f32,
        on_change: F,
    ) -> Option<ModeTransition> {
        let next = Mode::from_deviations(local, peer, self.threshold);
        if next == self.mode {
            return None;
        }

        let transition = ModeTransition {
            from: self.mode,
            to: next,
        };
        on_change(transition.from, transition.to);
        self.mode = next;
        Some(transition)
    }

    /// Restores the activation mode without firing any hook.
    pub fn reset(&mut self, initial: Mode) {
        self.mode = initial;
    }
}
