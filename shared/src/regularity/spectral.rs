use log::warn;

use crate::{
    regularity::{RegularityInput, RegularityMetric},
    spectrum::SpectrumAnalyzer,
};

/// Which spectral statistic is reported as the deviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpectralFeature {
    /// Geometric over arithmetic mean of the power spectrum. Near 1 for
    /// noise-like motion, near 0 for tonal motion: higher = less regular.
    #[default]
    Flatness,
    /// `Σ p·ln(p)` over the power spectrum, unnormalized. This grows with
    /// tonal energy, so its threshold direction is the opposite of every
    /// other metric. It is reported as computed, not remapped.
    Entropy,
}

/// Regularity from the shape of the windowed power spectrum of the sensor
/// history.
#[derive(Debug)]
pub struct SpectralMetric {
    feature: SpectralFeature,
    analyzer: SpectrumAnalyzer,
}

impl SpectralMetric {
    pub fn new(history_len: usize, feature: SpectralFeature, remove_mean: bool) -> Self {
        if feature == SpectralFeature::Entropy {
            warn!("spectral entropy deviation grows as motion becomes more regular; thresholds compare in the inverted direction");
        }
        Self {
            feature,
            analyzer: SpectrumAnalyzer::new(history_len, remove_mean),
        }
    }

    pub fn feature(&self) -> SpectralFeature {
        self.feature
    }
}

impl RegularityMetric for SpectralMetric {
    fn deviation(&mut self, input: &RegularityInput<'_>) -> f32 {
        let power = self.analyzer.power_spectrum(input.sensor_history);
        match self.feature {
            SpectralFeature::Flatness => spectral_flatness(&power),
            SpectralFeature::Entropy => spectral_entropy(&power),
        }
    }

    fn name(&self) -> &'static str {
        match self.feature {
            SpectralFeature::Flatness => "spectral-flatness",
            SpectralFeature::Entropy => "spectral-entropy",
        }
    }
}

/// Geometric mean / arithmetic mean of `power`, in `[0, 1]`.
///
/// Computed in the log domain so long spectra neither underflow nor overflow.
/// Any empty bin makes the geometric mean zero; an all-zero spectrum reports 0.
pub fn spectral_flatness(power: &[f32]) -> f32 {
    if power.is_empty() {
        return 0.0;
    }
    let count = power.len() as f64;
    let arith_mean = power.iter().map(|bin| f64::from(*bin)).sum::<f64>() / count;
    if arith_mean <= 0.0 || !arith_mean.is_finite() {
        return 0.0;
    }
    if power.iter().any(|bin| *bin <= 0.0) {
        return 0.0;
    }
    let log_mean = power.iter().map(|bin| f64::from(*bin).ln()).sum::<f64>() / count;
    (log_mean.exp() / arith_mean) as f32
}

/// `Σ p·ln(p)` over `power`, taking `0·ln(0)` as 0.
pub fn spectral_entropy(power: &[f32]) -> f32 {
    power
        .iter()
        .filter(|bin| **bin > 0.0)
        .map(|bin| {
            let p = f64::from(*bin);
            p * p.ln()
        })
        .sum::<f64>() as f32
}
