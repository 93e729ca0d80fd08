/// Last values heard from a peer. Last value wins; nothing expires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeerState {
    /// [`PeerState::UNKNOWN_PERIOD`] until a peer period arrives.
    pub their_period: f32,
    /// Zero until a peer deviation arrives, which reads as a regular peer.
    pub their_deviation: f32,
}

impl PeerState {
    /// Sentinel for "no peer period yet". Never integrated.
    pub const UNKNOWN_PERIOD: f32 = -1.0;

    pub fn new() -> Self {
        Self {
            their_period: Self::UNKNOWN_PERIOD,
            their_deviation: 0.0,
        }
    }

    /// The peer period, if a usable one has been heard.
    pub fn known_period(&self) -> Option<f32> {
        (self.their_period > 0.0).then_some(self.their_period)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PeerState {
    fn default() -> Self {
        Self::new()
    }
}
