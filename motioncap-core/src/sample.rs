//! Sensor sample types

/// Three-axis reading in sensor-specific units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axes {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// One unsmoothed reading of every streamed channel
///
/// Acceleration is in milli-g, the magnetic field in nanotesla and the
/// heading in whole degrees (0-359, clockwise from magnetic north).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub accel_x: i32,
    pub accel_y: i32,
    pub mag_x: i32,
    pub mag_y: i32,
    pub heading: i32,
}
