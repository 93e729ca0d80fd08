use std::time::Instant;

use crate::ring_buffer::RingBuffer;

/// Measures the real sensor sample interval from the wall-clock gaps between
/// recompute cycles.
///
/// Each cycle spans `steps_between_update` samples, so a gap is divided by
/// that factor before it is stored. The reported interval is the mean of the
/// gaps recorded so far; before the first gap the nominal interval is used.
#[derive(Clone, Debug)]
pub struct SampleClock {
    gaps: RingBuffer<f32>,
    steps_between_update: usize,
    nominal_interval_ms: f32,
    previous_cycle: Option<Instant>,
}

impl SampleClock {
    pub fn new(history_len: usize, steps_between_update: usize, nominal_interval_ms: f32) -> Self {
        Self {
            gaps: RingBuffer::new(history_len),
            steps_between_update: steps_between_update.max(1),
            nominal_interval_ms,
            previous_cycle: None,
        }
    }

    /// Records the start of a recompute cycle.
    pub fn record_cycle(&mut self, now: Instant) {
        if let Some(previous) = self.previous_cycle {
            // a clock that steps backwards yields a zero gap
            let elapsed = now.saturating_duration_since(previous);
            let per_sample_ms = elapsed.as_secs_f32() * 1000.0 / self.steps_between_update as f32;
            self.gaps.push(per_sample_ms);
        }
        self.previous_cycle = Some(now);
    }

    /// Mean per-sample interval in milliseconds.
    pub fn sample_interval_ms(&self) -> f32 {
        let filled = self.gaps.filled();
        if filled == 0 {
            return self.nominal_interval_ms;
        }
        let total: f32 = self.gaps.window().rev().take(filled).sum();
        total / filled as f32
    }

    /// Samples per second implied by [`Self::sample_interval_ms`]. Zero when
    /// no time has elapsed between cycles.
    pub fn sample_frequency_hz(&self) -> f32 {
        let interval = self.sample_interval_ms();
        if interval > 0.0 {
            1000.0 / interval
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.gaps.clear();
        self.previous_cycle = None;
    }
}
