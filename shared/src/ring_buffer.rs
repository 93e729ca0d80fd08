use std::{
    iter::{Chain, Copied},
    slice,
};

/// Chronological (oldest first) view over a [`RingBuffer`]. Double-ended, so
/// consumers that need newest-first order can call `.rev()`.
pub type Window<'a, T> = Chain<Copied<slice::Iter<'a, T>>, Copied<slice::Iter<'a, T>>>;

/// Ring buffer of recent scalar sensor magnitudes.
pub type SensorRingBuffer = RingBuffer<f32>;

/// Fixed-capacity circular store. The oldest slot is overwritten first.
///
/// The buffer always exposes exactly `capacity` values: slots that have not
/// been written yet hold `T::default()`, which is a known cold-start artifact
/// for every consumer.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Box<[T]>,
    write_pos: usize,
    filled: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// # Panics
    /// Panics if `capacity` is zero. Validated configurations never request
    /// an empty buffer.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be non-zero");
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            write_pos: 0,
            filled: 0,
        }
    }

    /// Writes `value` at the current position and advances it.
    pub fn push(&mut self, value: T) {
        self.slots[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.slots.len();
        if self.filled < self.slots.len() {
            self.filled += 1;
        }
    }

    /// Lazy view of the last `capacity` values, oldest first. Calling it again
    /// restarts the view; so does cloning it.
    pub fn window(&self) -> Window<'_, T> {
        let (newer, older) = self.slots.split_at(self.write_pos);
        older.iter().copied().chain(newer.iter().copied())
    }

    /// Most recently pushed value, if anything has been pushed.
    pub fn latest(&self) -> Option<T> {
        if self.filled == 0 {
            return None;
        }
        let index = (self.write_pos + self.slots.len() - 1) % self.slots.len();
        Some(self.slots[index])
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Always equal to the capacity.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of slots that hold a pushed value rather than the default.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_warm(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Slots in storage order, ignoring the write position. Useful for
    /// order-insensitive statistics.
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = T::default());
        self.write_pos = 0;
        self.filled = 0;
    }
}
