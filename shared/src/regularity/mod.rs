use crate::{period_history::PeriodHistory, ring_buffer::SensorRingBuffer};

pub mod period_variance;
pub mod spectral;

/// Everything a regularity metric may look at. Each metric reads only the
/// part it needs.
#[derive(Clone, Copy, Debug)]
pub struct RegularityInput<'a> {
    pub sensor_history: &'a SensorRingBuffer,
    pub period_history: &'a PeriodHistory,
}

impl<'a> RegularityInput<'a> {
    pub fn new(sensor_history: &'a SensorRingBuffer, period_history: &'a PeriodHistory) -> Self {
        Self {
            sensor_history,
            period_history,
        }
    }
}

/// Scores how irregular the recent motion has been. The score is compared
/// against the deviation threshold with `>=`; every metric shipped here,
/// except the raw spectral entropy, reports larger values for less regular
/// motion.
pub trait RegularityMetric: Send {
    fn deviation(&mut self, input: &RegularityInput<'_>) -> f32;

    fn name(&self) -> &'static str;
}

impl<M: RegularityMetric + ?Sized> RegularityMetric for Box<M> {
    fn deviation(&mut self, input: &RegularityInput<'_>) -> f32 {
        (**self).deviation(input)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
