//! Board-agnostic core logic for the MotionCap firmware
//!
//! This crate contains the application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor traits (accelerometer, compass)
//! - Moving-average ring buffers
//! - Button policy (calibration gestures)
//! - The per-cycle sampler that produces stream records
//! - Stream configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod sample;
pub mod sampler;
pub mod smoothing;
pub mod traits;

pub use buttons::{BootAction, ButtonState, CycleAction};
pub use config::StreamConfig;
pub use sample::{Axes, RawSample};
pub use sampler::{Cycle, Sampler};
pub use smoothing::{ChannelSmoother, RingAverager, WINDOW};
