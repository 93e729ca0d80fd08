use thiserror::Error;

use entrain_shared::{ConfigError, PeerMessageError, WireError};

use crate::transport::{RecvError, SendError};

/// Faults raised while processing a single sensor sample. The loop records
/// them and carries on with the next sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Reading, or its magnitude, is NaN or infinite
    #[error("Sensor reading ({x}, {y}, {z}) has no finite magnitude. The sample was dropped")]
    NonFiniteSample { x: f32, y: f32, z: f32 },

    /// Regularity metric returned NaN or infinity
    #[error("Regularity metric {metric} produced a non-finite deviation {value}. Keeping the previous deviation {previous}")]
    NonFiniteDeviation {
        metric: &'static str,
        value: f32,
        previous: f32,
    },
}

/// Errors surfaced by a [`Node`](crate::Node)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Sensor processing fault: {0}")]
    Sync(#[from] SyncError),

    #[error("Unusable peer broadcast: {0}")]
    PeerMessage(#[from] PeerMessageError),

    #[error("Malformed broadcast packet: {0}")]
    Wire(#[from] WireError),

    #[error("Broadcast failed: {0}")]
    Send(#[from] SendError),

    #[error("Receiving broadcasts failed: {0}")]
    Recv(#[from] RecvError),
}
