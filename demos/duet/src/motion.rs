use std::f32::consts::PI;

use entrain_node::SensorReading;

/// Synthetic gyroscope: a swing of fixed tempo with a little hand tremor,
/// optionally losing the beat every so often.
pub struct Swing {
    period_samples: f32,
    tick: u32,
    erratic_every: Option<u32>,
    rng: fastrand::Rng,
}

impl Swing {
    pub fn steady(period_samples: f32, seed: u64) -> Self {
        Self {
            period_samples,
            tick: 0,
            erratic_every: None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Thrashes around for a third of every `every` samples.
    pub fn erratic(period_samples: f32, every: u32, seed: u64) -> Self {
        Self {
            erratic_every: Some(every),
            ..Self::steady(period_samples, seed)
        }
    }

    pub fn next_reading(&mut self) -> SensorReading {
        self.tick += 1;
        let tremor = (self.rng.f32() - 0.5) * 0.2;

        let thrashing = self
            .erratic_every
            .is_some_and(|every| self.tick % every < every / 3);
        if thrashing {
            let noise = || (self.rng.f32() - 0.5) * 6.0;
            return SensorReading::from_euler(noise(), noise(), noise());
        }

        let phase = 2.0 * PI * self.tick as f32 / self.period_samples;
        SensorReading::from_euler(2.0 * phase.sin() + tremor, 0.5 + tremor, 0.3)
    }
}
