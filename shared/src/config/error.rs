use thiserror::Error;

/// Errors found while validating a [`SyncConfig`](crate::SyncConfig)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A ring buffer was configured with no slots
    #[error("{field} must be at least 1, got 0")]
    ZeroCapacity { field: &'static str },

    /// Decimation factor of zero would never recompute
    #[error("steps_between_update must be at least 1, got 0")]
    ZeroDecimation,

    /// Exponential smoothing factor outside (0, 1]
    #[error("smoothing factor {smoothing} must be in (0, 1]")]
    SmoothingOutOfRange { smoothing: f32 },

    /// Period normalization range is empty or inverted
    #[error("period range [{min_ms}, {max_ms}]ms must satisfy min < max")]
    InvalidPeriodRange { min_ms: f32, max_ms: f32 },

    /// A limit or interval that must be positive is not
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Deviation threshold is NaN or infinite
    #[error("deviation threshold {threshold} must be finite")]
    NonFiniteThreshold { threshold: f32 },

    /// FFT padding leaves no bins to scan
    #[error("FFT padding {padding} leaves no bins to scan in a half-spectrum of {half_len} bins")]
    FftPaddingTooLarge { padding: usize, half_len: usize },

    /// Sample variance divides by H - 1
    #[error("sample variance needs a period history of at least 2 slots, got {period_history_len}")]
    PeriodHistoryTooShort { period_history_len: usize },

    /// FFT-peak estimator and spectral metric window the same history
    /// differently
    #[error("FFT-peak remove_mean={estimator} disagrees with spectral metric remove_mean={metric}")]
    MismatchedMeanRemoval { estimator: bool, metric: bool },
}
