//! Hardware abstraction traits
//!
//! These traits define the interface between the sampling logic and
//! sensor-specific drivers.

pub mod sensor;

pub use sensor::{Accelerometer, Compass, MotionSensor, SensorError};
