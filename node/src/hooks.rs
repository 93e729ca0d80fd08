use entrain_shared::Mode;

/// Receives the beat interval whenever a valid integrated period is produced.
///
/// Runs while the [`Node`](crate::Node) lock is held. It must not call back
/// into the same node (even `status()` would deadlock); record what it needs
/// and let the caller query the node after the triggering call returns.
pub trait ClockDriver: Send {
    fn set_interval(&mut self, interval_ms: f32);
}

impl<F: FnMut(f32) + Send> ClockDriver for F {
    fn set_interval(&mut self, interval_ms: f32) {
        self(interval_ms)
    }
}

/// Called with `(old, new)` on every actual mode change, before the node's
/// mode is updated.
///
/// Runs while the [`Node`](crate::Node) lock is held, so it must not call
/// back into the same node.
pub trait ModeChangeHook: Send {
    fn on_mode_changed(&mut self, from: Mode, to: Mode);
}

impl<F: FnMut(Mode, Mode) + Send> ModeChangeHook for F {
    fn on_mode_changed(&mut self, from: Mode, to: Mode) {
        self(from, to)
    }
}
