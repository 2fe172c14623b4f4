//! Moving-average ring buffers
//!
//! Each channel keeps the last `N` raw readings. Slots start at zero and
//! every average divides by `N`, so the first few outputs after power-up
//! are pulled toward zero until the window has filled.

use crate::sample::RawSample;

/// Window size used by the firmware
pub const WINDOW: usize = 2;

/// Fixed-size ring buffer that averages its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingAverager<const N: usize> {
    slots: [i32; N],
    pos: usize,
}

impl<const N: usize> Default for RingAverager<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingAverager<N> {
    const NON_EMPTY: () = assert!(N > 0, "ring buffer needs at least one slot");

    /// Create a ring buffer with all slots zeroed
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            slots: [0; N],
            pos: 0,
        }
    }

    /// Store a value in the current slot and advance the write position
    pub fn push(&mut self, value: i32) {
        self.slots[self.pos] = value;
        self.pos += 1;
        if self.pos >= N {
            self.pos = 0;
        }
    }

    /// Integer mean of all slots
    ///
    /// Truncates toward zero. The sum is taken in 64 bits so any mix of
    /// `i32` values is safe.
    pub fn average(&self) -> i32 {
        let sum: i64 = self.slots.iter().map(|&v| v as i64).sum();
        (sum / N as i64) as i32
    }

    /// Zero all slots and rewind
    pub fn clear(&mut self) {
        self.slots = [0; N];
        self.pos = 0;
    }

    /// Next slot to be written
    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Raw slot contents in storage order
    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[i32; N] {
        &self.slots
    }
}

/// One ring buffer per sampled channel
#[derive(Debug, Clone, Default)]
pub struct ChannelSmoother<const N: usize> {
    accel_x: RingAverager<N>,
    accel_y: RingAverager<N>,
    mag_x: RingAverager<N>,
    mag_y: RingAverager<N>,
    heading: RingAverager<N>,
}

impl<const N: usize> ChannelSmoother<N> {
    /// Create a smoother with all channels zeroed
    pub const fn new() -> Self {
        Self {
            accel_x: RingAverager::new(),
            accel_y: RingAverager::new(),
            mag_x: RingAverager::new(),
            mag_y: RingAverager::new(),
            heading: RingAverager::new(),
        }
    }

    /// Add a raw sample and return the averaged channels
    pub fn push(&mut self, raw: RawSample) -> RawSample {
        self.accel_x.push(raw.accel_x);
        self.accel_y.push(raw.accel_y);
        self.mag_x.push(raw.mag_x);
        self.mag_y.push(raw.mag_y);
        self.heading.push(raw.heading);
        self.average()
    }

    /// Current averages without adding a sample
    pub fn average(&self) -> RawSample {
        RawSample {
            accel_x: self.accel_x.average(),
            accel_y: self.accel_y.average(),
            mag_x: self.mag_x.average(),
            mag_y: self.mag_y.average(),
            heading: self.heading.average(),
        }
    }

    /// Zero every channel
    pub fn clear(&mut self) {
        self.accel_x.clear();
        self.accel_y.clear();
        self.mag_x.clear();
        self.mag_y.clear();
        self.heading.clear();
    }
}
