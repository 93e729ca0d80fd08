use crate::regularity::{RegularityInput, RegularityMetric};

/// Divisor applied to the summed squared deviations before the square root.
///
/// The choice changes the effective sensitivity of the mode state machine, so
/// thresholds are only meaningful together with the normalization they were
/// tuned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VarianceNormalization {
    /// Divide by `H`.
    #[default]
    Population,
    /// Divide by `H - 1`.
    Sample,
    /// No division: the root of the plain sum of squares.
    Unnormalized,
}

/// Standard deviation of the normalized period history, in normalized period
/// units. A steady tempo keeps it near zero.
///
/// Every slot of the history takes part, including slots not yet written,
/// which read as zero during warm-up.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeriodVarianceMetric {
    normalization: VarianceNormalization,
}

impl PeriodVarianceMetric {
    pub fn new(normalization: VarianceNormalization) -> Self {
        Self { normalization }
    }

    pub fn normalization(&self) -> VarianceNormalization {
        self.normalization
    }

    /// Spread of `values` under this metric's normalization.
    pub fn spread(&self, values: &[f32]) -> f32 {
        let count = values.len();
        if count == 0 {
            return 0.0;
        }
        let mean = values.iter().sum::<f32>() / count as f32;
        let squares: f32 = values.iter().map(|value| (value - mean) * (value - mean)).sum();

        let divisor = match self.normalization {
            VarianceNormalization::Population => count as f32,
            VarianceNormalization::Sample => count.saturating_sub(1).max(1) as f32,
            VarianceNormalization::Unnormalized => 1.0,
        };
        (squares / divisor).sqrt()
    }
}

impl RegularityMetric for PeriodVarianceMetric {
    fn deviation(&mut self, input: &RegularityInput<'_>) -> f32 {
        self.spread(input.period_history.values().as_slice())
    }

    fn name(&self) -> &'static str {
        "period-variance"
    }
}
