use crate::{
    estimator::{PeriodEstimate, PeriodicityEstimator},
    ring_buffer::SensorRingBuffer,
    spectrum::SpectrumAnalyzer,
};

/// Divisor used to turn a bin index into a frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrequencyScale {
    /// `bin * fs / C`, the bin spacing of a length-`C` transform.
    #[default]
    FullWindow,
    /// `bin * fs / (C/2)`, which reports half the period of `FullWindow`.
    HalfWindow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FftPeakConfig {
    /// Bins skipped at each end of the scanned half-spectrum.
    pub padding: usize,
    pub frequency_scale: FrequencyScale,
    /// Subtract the window mean before the transform.
    pub remove_mean: bool,
}

impl Default for FftPeakConfig {
    fn default() -> Self {
        Self {
            padding: 1,
            frequency_scale: FrequencyScale::FullWindow,
            remove_mean: false,
        }
    }
}

/// Period from the strongest bin of the windowed magnitude spectrum.
///
/// Confidence is the peak amplitude minus the mean amplitude of the
/// half-spectrum, a simple measure of how much the peak stands out.
#[derive(Debug)]
pub struct FftPeakEstimator {
    config: FftPeakConfig,
    analyzer: SpectrumAnalyzer,
}

impl FftPeakEstimator {
    pub fn new(history_len: usize, config: FftPeakConfig) -> Self {
        Self {
            config,
            analyzer: SpectrumAnalyzer::new(history_len, config.remove_mean),
        }
    }

    pub fn config(&self) -> &FftPeakConfig {
        &self.config
    }
}

impl PeriodicityEstimator for FftPeakEstimator {
    fn estimate(&mut self, history: &SensorRingBuffer, sample_interval_ms: f32) -> PeriodEstimate {
        if sample_interval_ms <= 0.0 || !sample_interval_ms.is_finite() {
            return PeriodEstimate::none();
        }

        let len = history.len();
        let magnitudes = self.analyzer.magnitudes(history);
        let half = magnitudes.len();
        let padding = self.config.padding;
        if half == 0 || padding >= half.saturating_sub(padding) {
            return PeriodEstimate::none();
        }

        let average = magnitudes.iter().sum::<f32>() / half as f32;

        let mut peak = f32::MIN;
        let mut best_bin = None;
        for (bin, amplitude) in magnitudes
            .iter()
            .enumerate()
            .take(half - padding)
            .skip(padding)
        {
            if *amplitude > peak {
                peak = *amplitude;
                best_bin = Some(bin);
            }
        }

        let Some(bin) = best_bin else {
            return PeriodEstimate::none();
        };
        if peak <= 0.0 {
            // flat history, nothing periodic to report
            return PeriodEstimate::none();
        }

        let sample_freq_hz = 1000.0 / sample_interval_ms;
        let divisor = match self.config.frequency_scale {
            FrequencyScale::FullWindow => len as f32,
            FrequencyScale::HalfWindow => half as f32,
        };
        let frequency_hz = bin as f32 * sample_freq_hz / divisor;

        PeriodEstimate::new(1000.0 / frequency_hz, peak - average)
    }

    fn name(&self) -> &'static str {
        "fft-peak"
    }
}
