//! # Entrain Node
//! A synchronization node that estimates the period and regularity of a
//! motion sensor stream, derives a coordination mode from its own and a
//! peer's regularity, and drives a shared clock with the integrated period.
//! Estimates are exchanged with peers over a lossy, unordered broadcast
//! channel.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use entrain_shared::{
        wire, CrossingFallback, EstimatorKind, FftPeakConfig, FrequencyScale, PeriodRange,
        PeriodicityEstimator, RegularityKind, RegularityMetric, SoloPolicy, SpectralFeature,
        VarianceNormalization,
    };
}

mod error;
mod events;
mod hooks;
mod node;
mod node_config;
mod status;
mod sync_loop;

pub use entrain_shared::{
    Mode, ModeTransition, NamedValue, NodeId, PeerUpdate, SensorReading, SyncConfig,
};
pub use error::{NodeError, SyncError};
pub use events::{Beat, BeatEvent, ErrorEvent, Event, Events, IntervalEvent, ModeChangeEvent};
pub use hooks::{ClockDriver, ModeChangeHook};
pub use node::Node;
pub use node_config::NodeConfig;
pub use status::{ErrorCounts, NodeStatus};
pub use sync_loop::SynchronizationLoop;
