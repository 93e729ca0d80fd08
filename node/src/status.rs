use entrain_shared::Mode;

/// Running totals of everything the loop dropped instead of applying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorCounts {
    /// Period estimates outside `(0, max_estimate_ms)`
    pub rejected_estimates: u64,
    /// Integrated periods outside `(0, max_clock_interval_ms)`
    pub rejected_intervals: u64,
    /// Sensor samples or deviations that were not finite
    pub faulted_samples: u64,
    /// Broadcasts with unrecognized names or unusable values
    pub ignored_peer_messages: u64,
    /// Broadcasts that could not be sent or received
    pub transport_failures: u64,
}

/// Read-only snapshot of a node for display. Values are current as of the
/// moment the snapshot was taken.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStatus {
    pub mode: Mode,
    /// Smoothed local period in milliseconds, 0 until an estimate is accepted
    pub period: f32,
    pub period_strength: f32,
    /// `-1` until a peer period arrives
    pub their_period: f32,
    pub deviation: f32,
    pub their_deviation: f32,
    /// Most recent sensor magnitude
    pub intensity: f32,
    /// Last integrated period, whether or not it reached the clock
    pub integrated_period: Option<f32>,
    pub sample_interval_ms: f32,
    pub samples: u64,
    pub cycles: u64,
    pub beats: u64,
    pub errors: ErrorCounts,
    pub last_fault: Option<String>,
}
