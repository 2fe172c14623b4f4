//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the sensor traits
//! defined in motioncap-core:
//!
//! - LSM303AGR combined accelerometer and magnetometer (I2C)
//! - Compass math (hard-iron calibration, tilt-compensated heading)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;

pub use sensor::compass::{heading_degrees, HardIronCalibration};
pub use sensor::lsm303agr::Lsm303agr;
