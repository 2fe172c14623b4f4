//! Accelerometer and compass traits

use core::future::Future;

use crate::sample::Axes;

/// Errors that can occur while reading motion sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// No new data was available in time
    NotReady,
    /// Calibration did not see enough field variation
    NotCalibrated,
    /// Device identity register did not match
    InvalidId,
}

/// Three-axis accelerometer
pub trait Accelerometer {
    /// Read acceleration in milli-g
    fn read_acceleration(&mut self) -> impl Future<Output = Result<Axes, SensorError>>;
}

/// Three-axis magnetometer used as a compass
pub trait Compass {
    /// Read the calibrated magnetic field in nanotesla
    fn read_field(&mut self) -> impl Future<Output = Result<Axes, SensorError>>;

    /// Read the compass bearing in whole degrees (0-359)
    fn heading_degrees(&mut self) -> impl Future<Output = Result<i32, SensorError>>;

    /// Run the interactive calibration routine
    ///
    /// The user rotates the board while this runs; it returns when enough
    /// samples have been collected.
    fn calibrate(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Discard the current calibration
    fn clear_calibration(&mut self);

    /// Check whether a calibration is in effect
    fn is_calibrated(&self) -> bool;
}

/// A device providing both an accelerometer and a compass
pub trait MotionSensor: Accelerometer + Compass {}

// Blanket implementation
impl<T: Accelerometer + Compass> MotionSensor for T {}
