use crate::{
    constants::{
        DEFAULT_DEVIATION_THRESHOLD, DEFAULT_MAX_CLOCK_INTERVAL_MS, DEFAULT_MAX_ESTIMATE_MS,
        DEFAULT_PERIOD_MAX_MS, DEFAULT_PERIOD_MIN_MS, DEFAULT_SAMPLE_INTERVAL_MS,
    },
    estimator::{
        fft_peak::{FftPeakConfig, FftPeakEstimator},
        zero_crossing::{CrossingFallback, ZeroCrossingEstimator},
        PeriodicityEstimator,
    },
    integrator::SoloPolicy,
    mode::Mode,
    regularity::{
        period_variance::{PeriodVarianceMetric, VarianceNormalization},
        spectral::{SpectralFeature, SpectralMetric},
        RegularityMetric,
    },
};

pub mod error;
use error::ConfigError;

/// Period range mapped onto `[-1, 1]` before the tanh squash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodRange {
    pub min_ms: f32,
    pub max_ms: f32,
}

impl PeriodRange {
    pub fn new(min_ms: f32, max_ms: f32) -> Self {
        Self { min_ms, max_ms }
    }
}

impl Default for PeriodRange {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_MIN_MS, DEFAULT_PERIOD_MAX_MS)
    }
}

/// Which periodicity estimator a node runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EstimatorKind {
    ZeroCrossing { fallback: CrossingFallback },
    FftPeak(FftPeakConfig),
}

impl EstimatorKind {
    pub fn build(&self, history_len: usize) -> Box<dyn PeriodicityEstimator> {
        match self {
            EstimatorKind::ZeroCrossing { fallback } => {
                Box::new(ZeroCrossingEstimator::new(*fallback))
            }
            EstimatorKind::FftPeak(config) => Box::new(FftPeakEstimator::new(history_len, *config)),
        }
    }
}

/// Which regularity metric a node runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegularityKind {
    PeriodVariance {
        normalization: VarianceNormalization,
    },
    Spectral {
        feature: SpectralFeature,
        remove_mean: bool,
    },
}

impl RegularityKind {
    pub fn build(&self, history_len: usize) -> Box<dyn RegularityMetric> {
        match self {
            RegularityKind::PeriodVariance { normalization } => {
                Box::new(PeriodVarianceMetric::new(*normalization))
            }
            RegularityKind::Spectral {
                feature,
                remove_mean,
            } => Box::new(SpectralMetric::new(history_len, *feature, *remove_mean)),
        }
    }
}

/// Contains the tunables of the synchronization loop
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Number of sensor magnitudes kept for analysis (C)
    pub sensor_history_len: usize,
    /// Number of timed recompute gaps averaged into the sample interval
    pub interval_history_len: usize,
    /// Number of normalized periods kept for the variance metric (H)
    pub period_history_len: usize,
    /// Incoming samples per recompute cycle
    pub steps_between_update: usize,
    /// Sample interval assumed until the first gap has been timed
    pub nominal_sample_interval_ms: f32,
    /// Exponential smoothing factor (α) applied to accepted estimates
    pub smoothing: f32,
    /// Estimates at or above this are discarded
    pub max_estimate_ms: f32,
    /// Integrated periods at or above this never reach the clock
    pub max_clock_interval_ms: f32,
    /// Range used to normalize the period history
    pub period_range: PeriodRange,
    pub estimator: EstimatorKind,
    pub regularity: RegularityKind,
    /// Deviations at or above this count as irregular (T)
    pub deviation_threshold: f32,
    /// Mode at activation
    pub initial_mode: Mode,
    pub solo_policy: SoloPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::zero_crossing()
    }
}

impl SyncConfig {
    /// Zero-crossing period with spectral-flatness regularity: short history,
    /// fast decimation, starts in UNITY and adopts the peer's period in SOLO.
    ///
    /// Both presets remove the window mean before transforming; a magnitude
    /// never drops below zero and its offset would otherwise own the spectrum.
    pub fn zero_crossing() -> Self {
        Self {
            sensor_history_len: 128,
            interval_history_len: 10,
            period_history_len: 10,
            steps_between_update: 5,
            nominal_sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            smoothing: 0.2,
            max_estimate_ms: DEFAULT_MAX_ESTIMATE_MS,
            max_clock_interval_ms: DEFAULT_MAX_CLOCK_INTERVAL_MS,
            period_range: PeriodRange::default(),
            estimator: EstimatorKind::ZeroCrossing {
                fallback: CrossingFallback::UpperQuartile,
            },
            regularity: RegularityKind::Spectral {
                feature: SpectralFeature::Flatness,
                remove_mean: true,
            },
            deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
            initial_mode: Mode::Unity,
            solo_policy: SoloPolicy::AdoptPeer,
        }
    }

    /// FFT-peak period with the spread of a long period history as
    /// regularity: starts in DISJOINT and keeps averaging in SOLO. The
    /// threshold of 1.5 is tuned for the unnormalized spread.
    pub fn spectral_peak() -> Self {
        Self {
            sensor_history_len: 512,
            interval_history_len: 10,
            period_history_len: 100,
            steps_between_update: 10,
            nominal_sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            smoothing: 0.1,
            max_estimate_ms: DEFAULT_MAX_ESTIMATE_MS,
            max_clock_interval_ms: DEFAULT_MAX_CLOCK_INTERVAL_MS,
            period_range: PeriodRange::default(),
            estimator: EstimatorKind::FftPeak(FftPeakConfig {
                remove_mean: true,
                ..FftPeakConfig::default()
            }),
            regularity: RegularityKind::PeriodVariance {
                normalization: VarianceNormalization::Unnormalized,
            },
            deviation_threshold: 1.5,
            initial_mode: Mode::Disjoint,
            solo_policy: SoloPolicy::Average,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("sensor_history_len", self.sensor_history_len),
            ("interval_history_len", self.interval_history_len),
            ("period_history_len", self.period_history_len),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field });
            }
        }
        if self.steps_between_update == 0 {
            return Err(ConfigError::ZeroDecimation);
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange {
                smoothing: self.smoothing,
            });
        }
        for (field, value) in [
            ("nominal_sample_interval_ms", self.nominal_sample_interval_ms),
            ("max_estimate_ms", self.max_estimate_ms),
            ("max_clock_interval_ms", self.max_clock_interval_ms),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        let PeriodRange { min_ms, max_ms } = self.period_range;
        if !(min_ms.is_finite() && max_ms.is_finite() && min_ms < max_ms) {
            return Err(ConfigError::InvalidPeriodRange { min_ms, max_ms });
        }
        if !self.deviation_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold {
                threshold: self.deviation_threshold,
            });
        }
        if let EstimatorKind::FftPeak(fft) = &self.estimator {
            let half_len = self.sensor_history_len / 2;
            if fft.padding >= half_len.saturating_sub(fft.padding) {
                return Err(ConfigError::FftPaddingTooLarge {
                    padding: fft.padding,
                    half_len,
                });
            }
        }
        if let (
            EstimatorKind::FftPeak(fft),
            RegularityKind::Spectral { remove_mean, .. },
        ) = (&self.estimator, &self.regularity)
        {
            if fft.remove_mean != *remove_mean {
                return Err(ConfigError::MismatchedMeanRemoval {
                    estimator: fft.remove_mean,
                    metric: *remove_mean,
                });
            }
        }
        if let RegularityKind::PeriodVariance {
            normalization: VarianceNormalization::Sample,
        } = self.regularity
        {
            if self.period_history_len < 2 {
                return Err(ConfigError::PeriodHistoryTooShort {
                    period_history_len: self.period_history_len,
                });
            }
        }
        Ok(())
    }
}
