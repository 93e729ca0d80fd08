use log::warn;

use crate::{constants::DEFAULT_MAX_CLOCK_INTERVAL_MS, mode::Mode};

/// What a node in [`Mode::Solo`] does with a known peer period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SoloPolicy {
    /// Drive the clock with the peer's period alone.
    #[default]
    AdoptPeer,
    /// Average local and peer periods, as in [`Mode::Unity`].
    Average,
}

/// Blends the local and peer periods into the value that drives the shared
/// clock, and guards what reaches the clock.
#[derive(Clone, Debug)]
pub struct PeriodIntegrator {
    solo_policy: SoloPolicy,
    max_interval_ms: f32,
    rejected: u64,
}

impl Default for PeriodIntegrator {
    fn default() -> Self {
        Self::new(SoloPolicy::default(), DEFAULT_MAX_CLOCK_INTERVAL_MS)
    }
}

impl PeriodIntegrator {
    pub fn new(solo_policy: SoloPolicy, max_interval_ms: f32) -> Self {
        Self {
            solo_policy,
            max_interval_ms,
            rejected: 0,
        }
    }

    pub fn solo_policy(&self) -> SoloPolicy {
        self.solo_policy
    }

    /// Integrated period for `mode`. A peer period that is not a positive
    /// finite number (the `-1` sentinel included) is treated as unknown, and
    /// the local period is used as is.
    pub fn integrate(&self, mode: Mode, local_ms: f32, peer_ms: f32) -> f32 {
        if !(peer_ms.is_finite() && peer_ms > 0.0) {
            return local_ms;
        }
        match (mode, self.solo_policy) {
            (Mode::Unity, _) | (Mode::Solo, SoloPolicy::Average) => (local_ms + peer_ms) * 0.5,
            (Mode::Solo, SoloPolicy::AdoptPeer) => peer_ms,
            (Mode::Baseline, _) | (Mode::Disjoint, _) => local_ms,
        }
    }

    /// Passes `interval_ms` through only when `0 < interval_ms < max`.
    /// Anything else is dropped and counted.
    pub fn guard(&mut self, interval_ms: f32) -> Option<f32> {
        if interval_ms.is_finite() && interval_ms > 0.0 && interval_ms < self.max_interval_ms {
            return Some(interval_ms);
        }
        self.rejected += 1;
        warn!(
            "dropping clock interval {interval_ms}ms outside (0, {})ms",
            self.max_interval_ms
        );
        None
    }

    /// Number of intervals dropped by [`Self::guard`].
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn reset(&mut self) {
        self.rejected = 0;
    }
}
