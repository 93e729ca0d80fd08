// Range guards

/// Period estimates at or above this value (in milliseconds) are discarded
/// before they reach the smoothed period.
pub const DEFAULT_MAX_ESTIMATE_MS: f32 = 10_000.0;

/// Integrated periods at or above this value (in milliseconds) are never
/// forwarded to the clock driver.
pub const DEFAULT_MAX_CLOCK_INTERVAL_MS: f32 = 100_000.0;

// Normalization

/// Lower end of the period range mapped onto `[-1, 1]` by the period history.
pub const DEFAULT_PERIOD_MIN_MS: f32 = 100.0;

/// Upper end of the period range mapped onto `[-1, 1]` by the period history.
pub const DEFAULT_PERIOD_MAX_MS: f32 = 5_000.0;

// Timing

/// Sensor sample interval assumed until the first recompute cycle has been
/// timed. 128 samples at 20ms cover roughly 2.5s of motion.
pub const DEFAULT_SAMPLE_INTERVAL_MS: f32 = 20.0;

/// Deviation threshold used with spectral flatness.
pub const DEFAULT_DEVIATION_THRESHOLD: f32 = 0.14;
