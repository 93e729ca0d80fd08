use crate::{config::PeriodRange, ring_buffer::RingBuffer};

/// Ring of recent smoothed periods, each squashed into roughly `[-1, 1]` by
/// `tanh(2 * (p - min) / (max - min) - 1)` so that the spread of the history
/// is comparable across tempi.
#[derive(Clone, Debug)]
pub struct PeriodHistory {
    values: RingBuffer<f32>,
    range: PeriodRange,
}

impl PeriodHistory {
    pub fn new(capacity: usize, range: PeriodRange) -> Self {
        Self {
            values: RingBuffer::new(capacity),
            range,
        }
    }

    /// Maps a period in milliseconds into normalized period units.
    pub fn normalize(&self, period_ms: f32) -> f32 {
        let span = self.range.max_ms - self.range.min_ms;
        let linear = 2.0 * (period_ms - self.range.min_ms) / span - 1.0;
        linear.tanh()
    }

    pub fn push_period(&mut self, period_ms: f32) {
        let normalized = self.normalize(period_ms);
        self.values.push(normalized);
    }

    pub fn values(&self) -> &RingBuffer<f32> {
        &self.values
    }

    pub fn range(&self) -> PeriodRange {
        self.range
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
