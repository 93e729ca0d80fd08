use crate::{
    estimator::{PeriodEstimate, PeriodicityEstimator},
    ring_buffer::SensorRingBuffer,
};

/// Intervals beyond this count are averaged after trimming
/// `TRIM_PER_SIDE` values from each end of the sorted list.
const TRIMMED_MEAN_MIN_INTERVALS: usize = 6;
const TRIM_PER_SIDE: usize = 3;

/// How to summarize crossing intervals when there are too few to trim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CrossingFallback {
    /// Straight average of all intervals.
    Mean,
    /// The element at index `3 * len / 4` of the sorted intervals.
    #[default]
    UpperQuartile,
}

/// Period from the spacing of downward crossings of the window mean.
///
/// Cheap and robust: outlier intervals are rejected by a trimmed mean once
/// enough crossings are available. Confidence is not computed.
#[derive(Clone, Debug, Default)]
pub struct ZeroCrossingEstimator {
    fallback: CrossingFallback,
    intervals: Vec<u32>,
}

impl ZeroCrossingEstimator {
    pub fn new(fallback: CrossingFallback) -> Self {
        Self {
            fallback,
            intervals: Vec::new(),
        }
    }

    pub fn fallback(&self) -> CrossingFallback {
        self.fallback
    }

    /// Sample counts between successive downward crossings of the mean (an
    /// older sample above it followed by a newer one that is not), scanning
    /// from the newest sample back to the oldest. The span before the first
    /// crossing found is partial and is not reported.
    fn collect_intervals(&mut self, history: &SensorRingBuffer) {
        self.intervals.clear();

        let len = history.len();
        let mean = history.window().sum::<f32>() / len as f32;

        let mut newest_first = history.window().rev();
        let Some(newest) = newest_first.next() else {
            return;
        };

        let mut up = newest - mean > 0.0;
        let mut last_crossing: Option<usize> = None;
        for (index, value) in newest_first.enumerate() {
            let position = index + 1;
            let new_up = value - mean > 0.0;
            if new_up && !up {
                if let Some(last) = last_crossing {
                    self.intervals.push((position - last) as u32);
                }
                last_crossing = Some(position);
            }
            up = new_up;
        }
    }

    /// Representative crossing interval in samples, or zero if none were found.
    fn summarize(&mut self) -> f32 {
        if self.intervals.is_empty() {
            return 0.0;
        }
        self.intervals.sort_unstable();

        let count = self.intervals.len();
        if count > TRIMMED_MEAN_MIN_INTERVALS {
            let kept = &self.intervals[TRIM_PER_SIDE..count - TRIM_PER_SIDE];
            let total: u32 = kept.iter().sum();
            return total as f32 / kept.len() as f32;
        }

        match self.fallback {
            CrossingFallback::Mean => {
                let total: u32 = self.intervals.iter().sum();
                total as f32 / count as f32
            }
            CrossingFallback::UpperQuartile => self.intervals[3 * count / 4] as f32,
        }
    }
}

impl PeriodicityEstimator for ZeroCrossingEstimator {
    fn estimate(&mut self, history: &SensorRingBuffer, sample_interval_ms: f32) -> PeriodEstimate {
        self.collect_intervals(history);
        let crossing_samples = self.summarize();
        PeriodEstimate::new(crossing_samples * sample_interval_ms, 0.0)
    }

    fn name(&self) -> &'static str {
        "zero-crossing"
    }
}
