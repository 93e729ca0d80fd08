//! # Entrain Shared
//! Periodicity estimation, regularity metrics, coordination modes and peer
//! message naming shared by every entrain node.
//!
//! Everything in this crate is synchronous and owns no threads; the node crate
//! serializes access to it.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod config;
mod constants;
mod estimator;
mod integrator;
mod mode;
mod peer;
mod period_history;
mod regularity;
mod ring_buffer;
mod sample_clock;
mod sensor;
mod spectrum;
mod types;

pub use config::{
    error::ConfigError, EstimatorKind, PeriodRange, RegularityKind, SyncConfig,
};
pub use constants::{
    DEFAULT_DEVIATION_THRESHOLD, DEFAULT_MAX_CLOCK_INTERVAL_MS, DEFAULT_MAX_ESTIMATE_MS,
    DEFAULT_PERIOD_MAX_MS, DEFAULT_PERIOD_MIN_MS, DEFAULT_SAMPLE_INTERVAL_MS,
};
pub use estimator::{
    fft_peak::{FftPeakConfig, FftPeakEstimator, FrequencyScale},
    zero_crossing::{CrossingFallback, ZeroCrossingEstimator},
    PeriodEstimate, PeriodicityEstimator,
};
pub use integrator::{PeriodIntegrator, SoloPolicy};
pub use mode::{Mode, ModeStateMachine, ModeTransition};
pub use peer::{
    error::{PeerMessageError, WireError},
    peer_message::{NamedValue, PeerMessage, PeerValueKind},
    peer_state::PeerState,
    sync_channel::{PeerSyncChannel, PeerUpdate},
    wire,
};
pub use period_history::PeriodHistory;
pub use regularity::{
    period_variance::{PeriodVarianceMetric, VarianceNormalization},
    spectral::{spectral_entropy, spectral_flatness, SpectralFeature, SpectralMetric},
    RegularityInput, RegularityMetric,
};
pub use ring_buffer::{RingBuffer, SensorRingBuffer, Window};
pub use sample_clock::SampleClock;
pub use sensor::SensorReading;
pub use spectrum::SpectrumAnalyzer;
pub use types::NodeId;
