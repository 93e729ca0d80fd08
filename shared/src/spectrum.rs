use std::{f32::consts::PI, fmt, sync::Arc};

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::ring_buffer::SensorRingBuffer;

/// Windowed forward FFT over the full sensor history.
///
/// The history is taken oldest first, multiplied by `cos(π·i/C)`, and
/// transformed with a zeroed imaginary channel. Only the lower half of the
/// spectrum (`C/2` bins, DC included) is exposed.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    remove_mean: bool,
}

impl SpectrumAnalyzer {
    /// `remove_mean` subtracts the window mean before windowing, which keeps
    /// the DC term of a non-negative magnitude signal from leaking into the
    /// lowest bins.
    pub fn new(len: usize, remove_mean: bool) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(len);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        let window = (0..len)
            .map(|i| (PI * i as f32 / len as f32).cos())
            .collect();

        Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); len],
            scratch,
            remove_mean,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Number of bins in the lower half of the spectrum.
    pub fn half_len(&self) -> usize {
        self.window.len() / 2
    }

    /// Runs the transform. If the history length differs from the planned
    /// length the analyzer is re-planned first.
    pub fn analyze(&mut self, history: &SensorRingBuffer) -> &[Complex<f32>] {
        if history.len() != self.len() {
            *self = Self::new(history.len(), self.remove_mean);
        }

        let offset = if self.remove_mean {
            history.window().sum::<f32>() / history.len() as f32
        } else {
            0.0
        };

        for ((slot, sample), weight) in self
            .buffer
            .iter_mut()
            .zip(history.window())
            .zip(self.window.iter())
        {
            *slot = Complex::new((sample - offset) * weight, 0.0);
        }

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);
        let half = self.half_len();
        &self.buffer[..half]
    }

    /// Magnitude of each lower-half bin.
    pub fn magnitudes(&mut self, history: &SensorRingBuffer) -> Vec<f32> {
        self.analyze(history).iter().map(|bin| bin.norm()).collect()
    }

    /// `re² + im²` of each lower-half bin.
    pub fn power_spectrum(&mut self, history: &SensorRingBuffer) -> Vec<f32> {
        self.analyze(history).iter().map(|bin| bin.norm_sqr()).collect()
    }
}

impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("len", &self.len())
            .field("remove_mean", &self.remove_mean)
            .finish()
    }
}
