use crate::ring_buffer::SensorRingBuffer;

pub mod fft_peak;
pub mod zero_crossing;

/// Dominant period of the sensor history.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeriodEstimate {
    pub period_ms: f32,
    /// Estimator-specific "period strength". Zero when the estimator does not
    /// compute one.
    pub confidence: f32,
}

impl PeriodEstimate {
    pub fn new(period_ms: f32, confidence: f32) -> Self {
        Self {
            period_ms,
            confidence,
        }
    }

    /// Returned when the history holds nothing periodic to measure.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the period may enter the smoothed period: `0 < period < max_ms`.
    pub fn is_acceptable(&self, max_ms: f32) -> bool {
        self.period_ms.is_finite() && self.period_ms > 0.0 && self.period_ms < max_ms
    }
}

/// Computes a period estimate from the sensor history.
///
/// Implementations fail soft: an empty or featureless history yields
/// [`PeriodEstimate::none`], never a panic or a NaN.
pub trait PeriodicityEstimator: Send {
    fn estimate(&mut self, history: &SensorRingBuffer, sample_interval_ms: f32) -> PeriodEstimate;

    fn name(&self) -> &'static str;
}

impl<E: PeriodicityEstimator + ?Sized> PeriodicityEstimator for Box<E> {
    fn estimate(&mut self, history: &SensorRingBuffer, sample_interval_ms: f32) -> PeriodEstimate {
        (**self).estimate(history, sample_interval_ms)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
