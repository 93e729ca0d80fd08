use std::f32::consts::PI;

use entrain_node::SensorReading;

/// Synthetic sensor stream, one reading per sample tick
pub trait MotionSource {
    fn next_reading(&mut self) -> SensorReading;
}

/// Steady swing on the z axis around a resting offset. Its magnitude is
/// `offset + amplitude * sin(2π (t + 0.3) / period)`, so with
/// `offset > amplitude` the magnitude carries the swing unrectified.
pub struct SineMotion {
    period_samples: f32,
    amplitude: f32,
    offset: f32,
    tick: u64,
}

impl SineMotion {
    pub fn new(period_samples: f32) -> Self {
        Self {
            period_samples,
            amplitude: 2.0,
            offset: 9.81,
            tick: 0,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32, offset: f32) -> Self {
        self.amplitude = amplitude;
        self.offset = offset;
        self
    }
}

impl MotionSource for SineMotion {
    fn next_reading(&mut self) -> SensorReading {
        // phase offset keeps samples off the crossing level
        let phase = 2.0 * PI * (self.tick as f32 + 0.3) / self.period_samples;
        self.tick += 1;
        SensorReading::new(0.0, 0.0, self.offset + self.amplitude * phase.sin())
    }
}

/// Seeded white noise on every axis
pub struct NoiseMotion {
    rng: fastrand::Rng,
    amplitude: f32,
}

impl NoiseMotion {
    pub fn new(seed: u64, amplitude: f32) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            amplitude,
        }
    }

    fn component(&mut self) -> f32 {
        (self.rng.f32() - 0.5) * 2.0 * self.amplitude
    }
}

impl MotionSource for NoiseMotion {
    fn next_reading(&mut self) -> SensorReading {
        SensorReading::new(self.component(), self.component(), self.component())
    }
}

/// A device lying still
pub struct ConstantMotion {
    reading: SensorReading,
}

impl ConstantMotion {
    pub fn new(reading: SensorReading) -> Self {
        Self { reading }
    }
}

impl MotionSource for ConstantMotion {
    fn next_reading(&mut self) -> SensorReading {
        self.reading
    }
}
