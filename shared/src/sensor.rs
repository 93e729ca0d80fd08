/// One three-axis reading from the gyroscope or accelerometer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReading {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SensorReading {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Gyroscope layers that report `(pitch, roll, yaw)` feed the same axes.
    pub fn from_euler(pitch: f32, roll: f32, yaw: f32) -> Self {
        Self::new(pitch, roll, yaw)
    }

    /// `sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f32, f32, f32)> for SensorReading {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f32; 3]> for SensorReading {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}
